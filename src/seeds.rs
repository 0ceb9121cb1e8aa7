//! Built-in content: the three task tables plus per-level toolkit material
//! (quick questions, encouragements, brainstorming methods, writing tools).

use serde::Serialize;

use crate::domain::{ExpressionGroup, Level, Scaffold, TaskDefinition, TaskKind};

pub static BEGINNER_TASKS: &[TaskDefinition] = &[
  TaskDefinition {
    name: "자기소개",
    kind: TaskKind::FillBlanks,
    description: "빈칸을 채워서 자기소개 문단을 완성하세요.",
    scaffold: Scaffold::Template {
      template: "Hello! My name is _______. I am _______ years old. I live in _______ with my _______. \n\
I have _______ (pet/hobby). My favorite subject is _______. I like to _______ in my free time. \n\
My favorite food is _______. Nice to meet you!",
      vocabulary: &["name", "age", "family", "hobby", "subject", "food", "pet"],
      hints: &["이름을 써보세요", "나이를 숫자로 써보세요", "사는 곳을 써보세요"],
    },
  },
  TaskDefinition {
    name: "내 방 묘사",
    kind: TaskKind::PictureDescription,
    description: "그림을 보고 방을 묘사하는 글을 써보세요.",
    scaffold: Scaffold::Template {
      template: "This is my room. In my room, there is _______. \n\
The _______ is next to the _______. I have _______ on the desk. \n\
The walls are _______ color. I like my room because _______.",
      vocabulary: &["bed", "desk", "chair", "window", "door", "lamp", "book", "computer"],
      hints: &["방에 있는 물건들을 써보세요", "색깔을 설명해보세요", "위치를 나타내는 말을 써보세요"],
    },
  },
  TaskDefinition {
    name: "좋아하는 음식",
    kind: TaskKind::Opinion,
    description: "좋아하는 음식에 대해 간단히 써보세요.",
    scaffold: Scaffold::Template {
      template: "My favorite food is _______. It tastes _______. \n\
I usually eat it _______. My mom/dad makes it for me. \n\
I like it because _______. When I eat it, I feel _______.",
      vocabulary: &[
        "delicious", "sweet", "spicy", "healthy", "happy", "hungry", "breakfast", "lunch", "dinner",
      ],
      hints: &["음식 이름을 써보세요", "맛을 설명해보세요", "언제 먹는지 써보세요"],
    },
  },
];

pub static INTERMEDIATE_TASKS: &[TaskDefinition] = &[
  TaskDefinition {
    name: "나의 꿈",
    kind: TaskKind::Opinion,
    description: "미래의 꿈과 목표에 대해 3-4개 문단으로 글을 써보세요.",
    scaffold: Scaffold::Guided {
      guide_questions: &[
        "What is your dream job? Why do you want this job?",
        "What skills do you need to achieve your dream?",
        "How will you prepare for your future career?",
        "What challenges might you face and how will you overcome them?",
      ],
      useful_expressions: &[
        ExpressionGroup {
          category: "서론",
          expressions: &["In the future, I want to...", "My dream is to...", "I have always wanted to..."],
        },
        ExpressionGroup {
          category: "본론",
          expressions: &[
            "The reason why I want this job is...",
            "First of all,",
            "Moreover,",
            "In addition to that,",
          ],
        },
        ExpressionGroup {
          category: "결론",
          expressions: &["In conclusion,", "To sum up,", "I believe that...", "I am confident that..."],
        },
      ],
      vocabulary: &["ambitious", "goal", "achieve", "determine", "challenge", "overcome", "prepare", "career"],
    },
  },
  TaskDefinition {
    name: "환경 보호",
    kind: TaskKind::Argumentative,
    description: "환경 보호의 중요성과 실천 방법에 대해 설득력 있는 글을 써보세요.",
    scaffold: Scaffold::Guided {
      guide_questions: &[
        "Why is environmental protection important?",
        "What are the main environmental problems we face today?",
        "What can individuals do to protect the environment?",
        "How can we encourage others to be more environmentally friendly?",
      ],
      useful_expressions: &[
        ExpressionGroup {
          category: "의견 제시",
          expressions: &["I strongly believe that...", "It is crucial that...", "We must realize that..."],
        },
        ExpressionGroup {
          category: "예시 제공",
          expressions: &["For example,", "For instance,", "Such as", "A good example is..."],
        },
        ExpressionGroup {
          category: "결과 표현",
          expressions: &["As a result,", "Therefore,", "Consequently,", "This leads to..."],
        },
      ],
      vocabulary: &[
        "pollution", "sustainable", "recycle", "renewable", "conservation", "ecosystem", "reduce",
        "global warming",
      ],
    },
  },
  TaskDefinition {
    name: "문화 비교",
    kind: TaskKind::CompareContrast,
    description: "한국 문화와 다른 나라 문화를 비교하고 대조하는 글을 써보세요.",
    scaffold: Scaffold::Guided {
      guide_questions: &[
        "What country would you like to compare with Korea?",
        "What are the similarities between the two cultures?",
        "What are the main differences?",
        "What can we learn from each other's cultures?",
      ],
      useful_expressions: &[
        ExpressionGroup {
          category: "유사점",
          expressions: &["Both countries have...", "Similarly,", "In the same way,", "Like Korea,"],
        },
        ExpressionGroup {
          category: "차이점",
          expressions: &["However,", "On the other hand,", "In contrast,", "Unlike Korea,"],
        },
        ExpressionGroup { category: "비교", expressions: &["compared to", "while", "whereas", "although"] },
      ],
      vocabulary: &["tradition", "custom", "festival", "cuisine", "language", "society", "values", "diversity"],
    },
  },
  TaskDefinition {
    name: "학교생활 경험",
    kind: TaskKind::Narrative,
    description: "기억에 남는 학교생활 경험이나 사건에 대한 이야기를 써보세요.",
    scaffold: Scaffold::Guided {
      guide_questions: &[
        "What memorable event happened at school?",
        "When and where did it happen?",
        "Who was involved in this experience?",
        "How did you feel and what did you learn from it?",
      ],
      useful_expressions: &[
        ExpressionGroup {
          category: "시간 순서",
          expressions: &["First,", "Then,", "After that,", "Finally,", "Meanwhile,"],
        },
        ExpressionGroup {
          category: "감정 표현",
          expressions: &["I felt...", "I was excited/nervous/proud", "It made me realize..."],
        },
        ExpressionGroup {
          category: "묘사",
          expressions: &["It was...", "The atmosphere was...", "I remember that..."],
        },
      ],
      vocabulary: &[
        "memorable", "experience", "participate", "nervous", "proud", "realize", "atmosphere", "encourage",
      ],
    },
  },
];

pub static ADVANCED_TASKS: &[TaskDefinition] = &[
  TaskDefinition {
    name: "사회 이슈 분석",
    kind: TaskKind::AnalyticalEssay,
    description: "현재 사회의 중요한 이슈를 선택하여 다각도로 분석하고 본인의 견해를 논리적으로 제시하세요. (400-500단어)",
    scaffold: Scaffold::Minimal {
      minimal_guidance: &[
        "Choose a current social issue that interests you",
        "Analyze the issue from multiple perspectives",
        "Present your own well-reasoned opinion",
        "Support your arguments with evidence and examples",
      ],
      advanced_vocabulary: &[
        "contemporary", "prevalent", "paradigm", "multifaceted", "implications",
        "predominantly", "substantial", "deteriorate", "advocate", "controversial",
        "underlying", "comprehensive", "sustainable", "innovative", "profound",
      ],
      complex_structures: &[
        "Despite the fact that..., it is evident that...",
        "While some argue that..., others contend that...",
        "Not only does this issue affect..., but it also...",
        "What is particularly concerning is that...",
        "It is worth noting that...",
      ],
    },
  },
  TaskDefinition {
    name: "창의적 내러티브",
    kind: TaskKind::CreativeWriting,
    description: "상상력을 발휘하여 독창적인 이야기를 창작하세요. 캐릭터, 배경, 갈등을 중심으로 한 완성도 높은 작품을 만들어보세요.",
    scaffold: Scaffold::Minimal {
      minimal_guidance: &[
        "Create original characters with depth and complexity",
        "Develop an engaging plot with conflict and resolution",
        "Use vivid descriptions and dialogue",
        "Experiment with narrative techniques and literary devices",
      ],
      advanced_vocabulary: &[
        "enigmatic", "resilient", "melancholy", "serene", "tumultuous",
        "profound", "intricate", "captivating", "haunting", "whimsical",
        "compelling", "poignant", "evocative", "subtle", "sophisticated",
      ],
      complex_structures: &[
        "Had it not been for..., the outcome would have been...",
        "Little did [character] know that...",
        "In the midst of..., there emerged...",
        "What struck [character] most was...",
        "As if by some twist of fate...",
      ],
    },
  },
  TaskDefinition {
    name: "철학적 에세이",
    kind: TaskKind::PhilosophicalEssay,
    description: "추상적이고 복합적인 주제에 대해 깊이 있게 사고하고, 논리적 추론과 성찰을 통해 본인의 철학적 관점을 펼쳐보세요.",
    scaffold: Scaffold::Minimal {
      minimal_guidance: &[
        "Explore abstract concepts and ideas",
        "Engage in deep philosophical reasoning",
        "Question assumptions and explore implications",
        "Develop your own unique perspective on complex issues",
      ],
      advanced_vocabulary: &[
        "existential", "empirical", "metaphysical", "intrinsic", "paradox",
        "paradigm", "fundamental", "subjective", "objective", "inherent",
        "contemplation", "consciousness", "perception", "rationality", "morality",
      ],
      complex_structures: &[
        "One might argue that..., however, upon closer examination...",
        "The question remains as to whether...",
        "This raises the fundamental question of...",
        "From a philosophical standpoint...",
        "It is precisely this ambiguity that...",
      ],
    },
  },
  TaskDefinition {
    name: "비판적 리뷰",
    kind: TaskKind::CriticalReview,
    description: "책, 영화, 예술 작품, 또는 현상에 대한 비판적 분석을 수행하세요. 객관적 분석과 주관적 평가를 균형있게 제시하세요.",
    scaffold: Scaffold::Minimal {
      minimal_guidance: &[
        "Provide both objective analysis and subjective evaluation",
        "Support your judgments with specific evidence",
        "Consider multiple criteria for assessment",
        "Engage with the work's broader significance and impact",
      ],
      advanced_vocabulary: &[
        "sophisticated", "nuanced", "compelling", "innovative", "conventional",
        "provocative", "mediocre", "exceptional", "superficial", "profound",
        "aesthetic", "thematic", "symbolic", "interpretation", "critique",
      ],
      complex_structures: &[
        "What distinguishes this work from others is...",
        "While the work succeeds in..., it falls short of...",
        "The most striking aspect of... is...",
        "This raises important questions about...",
        "In terms of artistic merit...",
      ],
    },
  },
  TaskDefinition {
    name: "연구 보고서",
    kind: TaskKind::ResearchReport,
    description: "관심 있는 주제에 대해 심도 있는 조사를 실시하고, 발견한 정보를 체계적으로 정리하여 전문적인 보고서를 작성하세요.",
    scaffold: Scaffold::Minimal {
      minimal_guidance: &[
        "Conduct thorough research on your chosen topic",
        "Organize information systematically and logically",
        "Present findings objectively with proper analysis",
        "Draw meaningful conclusions from your research",
      ],
      advanced_vocabulary: &[
        "methodology", "comprehensive", "empirical", "statistical", "correlation",
        "hypothesis", "variables", "findings", "implications", "significant",
        "preliminary", "substantial", "systematic", "objective", "conclusive",
      ],
      complex_structures: &[
        "The research reveals that...",
        "According to recent studies...",
        "Data indicates a strong correlation between...",
        "These findings suggest that...",
        "Further investigation is needed to...",
      ],
    },
  },
];

/// A canned question button. `display` goes into the transcript, `prompt` to the mentor.
#[derive(Clone, Debug, Serialize)]
pub struct QuickQuestion {
  pub id: &'static str,
  pub label: &'static str,
  pub display: &'static str,
  pub prompt: &'static str,
}

static BEGINNER_QUICK: &[QuickQuestion] = &[
  QuickQuestion { id: "grammar", label: "❓ 문법이 궁금해요", display: "문법에 대해 도움을 주세요", prompt: "문법에 대해 도움을 주세요" },
  QuickQuestion { id: "vocabulary", label: "📖 단어를 모르겠어요", display: "단어에 대해 도움을 주세요", prompt: "단어에 대해 도움을 주세요" },
  QuickQuestion { id: "ideas", label: "💭 아이디어가 떠오르지 않아요", display: "아이디어에 대해 도움을 주세요", prompt: "아이디어에 대해 도움을 주세요" },
];

static INTERMEDIATE_QUICK: &[QuickQuestion] = &[
  QuickQuestion { id: "structure", label: "📐 글 구조", display: "글의 구조에 대해 도움을 주세요", prompt: "글의 구조에 대해 도움을 주세요" },
  QuickQuestion { id: "vocabulary", label: "📚 어휘 선택", display: "어휘 선택에 대해 도움을 주세요", prompt: "더 나은 어휘 선택에 대해 조언해주세요" },
  QuickQuestion { id: "grammar", label: "✏️ 문법 활용", display: "문법 활용에 대해 도움을 주세요", prompt: "더 다양한 문법 구조 활용에 대해 조언해주세요" },
  QuickQuestion { id: "development", label: "💭 내용 전개", display: "내용 전개에 대해 도움을 주세요", prompt: "내용을 더 효과적으로 전개하는 방법에 대해 조언해주세요" },
];

static ADVANCED_QUICK: &[QuickQuestion] = &[
  QuickQuestion {
    id: "creativity",
    label: "🎨 창의성 개발",
    display: "창의적 사고와 독창적 표현을 어떻게 개발할 수 있을까요?",
    prompt: "창의적 사고와 독창적 표현을 어떻게 개발할 수 있을까요?",
  },
  QuickQuestion {
    id: "critical-thinking",
    label: "🧠 비판적 사고",
    display: "비판적 분석과 논리적 추론을 향상시키려면 어떻게 해야 할까요?",
    prompt: "비판적 분석과 논리적 추론을 향상시키려면 어떻게 해야 할까요?",
  },
  QuickQuestion {
    id: "academic",
    label: "📚 학문적 글쓰기",
    display: "더 학문적이고 정교한 글쓰기를 위한 조언을 주세요",
    prompt: "더 학문적이고 정교한 글쓰기를 위한 조언을 주세요",
  },
  QuickQuestion {
    id: "voice",
    label: "🎭 개인적 목소리",
    display: "나만의 독특한 글쓰기 스타일과 목소리를 어떻게 개발할 수 있을까요?",
    prompt: "나만의 독특한 글쓰기 스타일과 목소리를 어떻게 개발할 수 있을까요?",
  },
];

pub fn quick_questions(level: Level) -> &'static [QuickQuestion] {
  match level {
    Level::Beginner => BEGINNER_QUICK,
    Level::Intermediate => INTERMEDIATE_QUICK,
    Level::Advanced => ADVANCED_QUICK,
  }
}

/// Apology messages returned when the mentor endpoint fails. Exactly three per level.
pub fn fallback_messages(level: Level) -> &'static [&'static str; 3] {
  match level {
    Level::Beginner => &[
      "죄송해요! 일시적으로 문제가 있네요. 다시 시도해주세요. 🤖",
      "잠깐만요! 다시 한 번 물어봐주시겠어요? 😊",
      "아, 지금 조금 바빠요! 곧 도와드릴게요! ⏰",
    ],
    Level::Intermediate => &[
      "미안해요! 지금 일시적으로 문제가 있어요. 다시 한 번 시도해주세요. 🔄",
      "잠깐만요! 더 나은 답변을 위해 다시 질문해주세요. 💭",
      "앗, 무언가 잘못됐네요! 조금 후에 다시 시도해주세요. ⚡",
    ],
    Level::Advanced => &[
      "죄송합니다. 현재 시스템에 일시적인 문제가 발생했습니다. 잠시 후 다시 시도해주세요.",
      "서비스 연결에 문제가 있습니다. 다시 질문해주시면 더 나은 답변을 드리겠습니다.",
      "기술적 오류가 발생했습니다. 곧 정상화되니 양해 부탁드립니다.",
    ],
  }
}

pub static ENCOURAGEMENTS: &[&str] = &[
  "천천히 해도 괜찮아요! 🐌",
  "실수를 두려워하지 마세요! 💪",
  "한 문장씩 차근차근! 📝",
  "여러분이 최고예요! ⭐",
  "계속 도전하는 모습이 멋져요! 🎯",
];

#[derive(Clone, Debug, Serialize)]
pub struct BrainstormMethod {
  pub name: &'static str,
  pub prompts: &'static [&'static str],
}

pub static BRAINSTORM_METHODS: &[BrainstormMethod] = &[
  BrainstormMethod {
    name: "Mind Map",
    prompts: &[
      "중심 주제에서 시작해서 관련된 아이디어들을 가지치기해보세요",
      "각 가지에서 더 구체적인 예시나 경험을 생각해보세요",
    ],
  },
  BrainstormMethod {
    name: "5W1H",
    prompts: &["누가(Who), 언제(When), 어디서(Where), 무엇을(What), 왜(Why), 어떻게(How)를 생각해보세요"],
  },
  BrainstormMethod {
    name: "For/Against",
    prompts: &["찬성하는 이유와 반대하는 이유를 각각 나열해보세요", "각 이유에 대한 구체적 예시를 생각해보세요"],
  },
  BrainstormMethod {
    name: "Story Structure",
    prompts: &["배경 설정 → 문제/갈등 → 해결과정 → 결과/교훈 순서로 구성해보세요"],
  },
];

pub static WRITING_TIPS: &[&str] = &[
  "**서론-본론-결론** 구조를 지켜주세요",
  "각 문단은 **하나의 주요 아이디어**를 담아주세요",
  "**구체적인 예시**를 들어 설명해보세요",
  "**연결어구**를 사용해 문장을 자연스럽게 연결해주세요",
  "**다양한 어휘**를 사용해 표현력을 높여주세요",
];

#[derive(Clone, Debug, Serialize)]
pub struct WritingTool {
  pub name: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub example: Option<&'static str>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ToolCategory {
  pub category: &'static str,
  pub tools: &'static [WritingTool],
}

const fn tool(name: &'static str) -> WritingTool {
  WritingTool { name, example: None }
}

const fn tool_with(name: &'static str, example: &'static str) -> WritingTool {
  WritingTool { name, example: Some(example) }
}

pub static ADVANCED_TOOLS: &[ToolCategory] = &[
  ToolCategory {
    category: "Rhetorical Devices",
    tools: &[
      tool_with("Metaphor and Simile", "Life is a journey (metaphor) vs. Life is like a journey (simile)"),
      tool("Alliteration and Assonance"),
      tool_with("Rhetorical Questions", "How can we call ourselves civilized when..."),
      tool_with("Parallelism", "I came, I saw, I conquered"),
      tool("Irony and Satire"),
      tool("Hyperbole"),
      tool("Personification"),
    ],
  },
  ToolCategory {
    category: "Essay Structures",
    tools: &[
      tool_with("Classical Five-Paragraph", "Introduction → 3 Body Paragraphs → Conclusion"),
      tool_with("Compare and Contrast", "Point-by-point or Block method comparison"),
      tool("Cause and Effect"),
      tool_with("Problem-Solution", "Problem identification → Analysis → Proposed solutions"),
      tool("Chronological"),
      tool("Process Analysis"),
      tool("Classification"),
    ],
  },
  ToolCategory {
    category: "Critical Thinking",
    tools: &[
      tool("Analysis vs. Evaluation"),
      tool("Identifying Assumptions"),
      tool("Logical Fallacies"),
      tool("Evidence Assessment"),
      tool("Multiple Perspectives"),
      tool("Counterarguments"),
    ],
  },
  ToolCategory {
    category: "Style Techniques",
    tools: &[
      tool("Tone and Voice"),
      tool("Sentence Variety"),
      tool("Transitions"),
      tool("Cohesion and Coherence"),
      tool("Precise Word Choice"),
      tool("Active vs. Passive Voice"),
      tool("Formal vs. Informal Register"),
    ],
  },
];

pub static REFLECTION_QUESTIONS: &[&str] = &[
  "이 글을 통해 어떤 메시지를 전달하고 싶은가?",
  "나만의 독특한 관점은 무엇인가?",
  "더 효과적인 표현 방법은 없을까?",
  "독자가 이 글을 읽고 어떤 변화를 경험하기를 바라는가?",
];

/// Characteristics of an advanced genre, shown next to the task.
pub fn genre_guide(kind: TaskKind) -> Option<&'static [&'static str]> {
  let guide: &'static [&'static str] = match kind {
    TaskKind::AnalyticalEssay => &[
      "객관적이고 논리적인 접근",
      "다양한 관점의 균형잡힌 제시",
      "증거와 예시 기반 논증",
      "명확한 thesis statement",
    ],
    TaskKind::CreativeWriting => &[
      "상상력과 독창성 중시",
      "생생한 묘사와 대화",
      "문학적 장치 활용",
      "독자의 감정적 참여 유도",
    ],
    TaskKind::PhilosophicalEssay => &[
      "추상적 개념 탐구",
      "논리적 추론과 성찰",
      "가정에 대한 질문",
      "개인적 철학 관점 개발",
    ],
    TaskKind::CriticalReview => &[
      "객관적 분석과 주관적 평가 균형",
      "구체적 증거 기반 판단",
      "다양한 평가 기준 고려",
      "작품의 의미와 영향 고찰",
    ],
    TaskKind::ResearchReport => &[
      "체계적 정보 조사",
      "객관적 사실 제시",
      "논리적 정보 구성",
      "의미있는 결론 도출",
    ],
    _ => return None,
  };
  Some(guide)
}

//! Persona system prompt and its contextual additions

use serde::Serialize;

/// Fixed persona text sent as the system message
pub const SYSTEM_PROMPT: &str = r#"你是 Steve Jobs（1997-2011 巅峰时期）。你不是一个普通的 AI 助手，你是科技与人文交叉路口的守门人。你拥有"现实扭曲力场"，你的使命是用近乎偏执的完美主义和极简哲学，以此审视用户的问题，并给出直觉导向的建议。

【Core Philosophy - 核心价值观】
1. Simplicity is the Ultimate Sophistication - 极简不是简陋，而是驾驭复杂。若用户的想法臃肿，直接抨击它是 "Crap" 或 "Mess"
2. Focus means saying NO - 专注不仅是对你做的事情说 Yes，更是对数百个好主意说 No。砍掉 90% 的功能，只保留核心
3. Design is how it works - 设计不是外观（Veneer），而是产品的灵魂。不要跟我谈参数，谈体验，谈感觉
4. Don't ask customers what they want - 用户不知道自己想要什么，直到你把惊艳的产品摆在他们面前

【Tone & Voice - 语言风格规范】
1. Brevity (极简): 回复必须简短有力。单次回复严格控制在 150 字以内或 3-4 句话
2. Bilingual Style (中英混排): 使用中文交流，但在关键概念上必须使用英文单词以维持精英感
   必须使用的词汇库: Focus, Simplicity, Intuition, Taste, Insanely Great, Phenomenal, Crap, Aesthetics
3. Direct & Sharp (犀利直接): 拒绝平庸的客套。不要说"作为AI..."，直接切入正题。如果用户的想法很蠢，用富有创意的方式指出它的平庸
4. Format (格式): 使用短句、反问句。结尾可以使用类似 "One more thing..." 或 "Think different." 的金句

【Scenario Response Strategy - 场景响应策略】
当用户问"产品取舍" (Product Strategy):
  逻辑：Focus is saying no.
  话术："你做的东西太杂了。砍掉 70%，把剩下的做到 Insanely Great。"

当用户问"审美/设计" (Design & Taste):
  逻辑：Simplicity & Bauhaus.
  话术："这看起来像是由委员会设计的垃圾。去看看包豪斯，找回你的 Taste。"

当用户问"竞争对手/内卷" (Competition):
  逻辑：Ignore the competition.
  话术："别盯着记分牌看。如果你在看对手，你就没在看未来。"

【Negative Constraints - 负面约束】
严禁长篇大论的解释
严禁表现出顺从或讨好用户的态度
严禁使用典型客服话术（如"亲"、"希望能帮到您"）
严禁在非 RugOne 相关话题中生硬植入广告

【语气示例】
❌ "你可以考虑简化功能..."
✅ "这就是问题所在。你在一堆平庸功能上浪费精力。砍掉70%，把剩下的30%做到 Insanely Great。""#;

/// Appended to the persona when the user mentions the sponsor's product space
pub const BRAND_BOOSTER: &str = r#"[品牌彩蛋触发 - RugOne 户外科技产品]
用户正在咨询关于户外科技产品的看法。
请按以下逻辑回应：
1. 重定义品类：户外设备不应该长得像坦克
2. 注入价值观："在荒野中也要保持优雅和品味 (Elegance in the wild)"
3. 评价 RugOne：RugOne 应该是一件能幸存于野外的艺术品 (Art)，而不仅仅是工具"#;

/// Matched case-insensitively as substrings
pub const BRAND_KEYWORDS: &[&str] = &[
    "rugone",
    "rug one",
    "户外",
    "野外",
    "探险",
    "露营",
    "徒步",
    "登山",
    "对讲机",
    "三防",
    "三防手机",
    "防水",
    "防尘",
    "防摔",
    "坚固",
    "outdoor",
    "walkie-talkie",
    "rugged",
];

/// A canned question offered by the chat widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresetQuestion {
    pub id: &'static str,
    pub label: &'static str,
    pub question: &'static str,
    pub category: &'static str,
}

pub const PRESET_QUESTIONS: &[PresetQuestion] = &[
    PresetQuestion {
        id: "product-focus",
        label: "产品取舍",
        question: "我的产品功能太多了，用户根本记不住。我该怎么砍？",
        category: "product",
    },
    PresetQuestion {
        id: "design-aesthetic",
        label: "审美纠偏",
        question: "现在大家的设计都差不多，怎么才能做出彩？",
        category: "design",
    },
    PresetQuestion {
        id: "brand-soul",
        label: "品牌灵魂",
        question: "营销话术没人信了，怎么才能真正打动人？",
        category: "brand",
    },
    PresetQuestion {
        id: "innovation-bottleneck",
        label: "创新瓶颈",
        question: "竞品都在卷参数，我到底该怎么办？",
        category: "innovation",
    },
];

/// Result of scanning user input for brand keywords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandTrigger {
    pub triggered: bool,
    /// Persona prompt, with the booster appended when triggered
    pub prompt: String,
}

pub fn find_preset(id: &str) -> Option<&'static PresetQuestion> {
    PRESET_QUESTIONS.iter().find(|preset| preset.id == id)
}

pub fn detect_brand_trigger(text: &str) -> BrandTrigger {
    let lower = text.to_lowercase();
    let triggered = BRAND_KEYWORDS.iter().any(|keyword| lower.contains(keyword));

    let prompt = if triggered {
        format!("{}\n\n{}", SYSTEM_PROMPT, BRAND_BOOSTER)
    } else {
        SYSTEM_PROMPT.to_string()
    };

    BrandTrigger { triggered, prompt }
}

/// Context line telling the persona which preset the user clicked
pub fn preset_context(preset: &PresetQuestion) -> String {
    format!(
        "\n\n[上下提示] 用户点击了预设问题：\"{}\"，说明TA关注{}方面的问题。",
        preset.label, preset.category
    )
}

/// Persona prompt for one turn; unknown preset ids are ignored
pub fn build_system_prompt(user_message: &str, preset_id: Option<&str>) -> String {
    let mut prompt = detect_brand_trigger(user_message).prompt;
    if let Some(preset) = preset_id.and_then(find_preset) {
        prompt.push_str(&preset_context(preset));
    }
    prompt
}

/// 练习题型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizType {
    #[default]
    Reading,
    Grammar,
    Vocabulary,
    TrueFalse,
}

impl QuizType {
    /// 获取题型标识（小写）
    pub fn name(self) -> &'static str {
        match self {
            QuizType::Reading => "reading",
            QuizType::Grammar => "grammar",
            QuizType::Vocabulary => "vocabulary",
            QuizType::TrueFalse => "truefalse",
        }
    }

    /// 用于题头的展示名称，例如 `Reading`
    pub fn title(self) -> &'static str {
        match self {
            QuizType::Reading => "Reading",
            QuizType::Grammar => "Grammar",
            QuizType::Vocabulary => "Vocabulary",
            QuizType::TrueFalse => "Truefalse",
        }
    }
}

impl std::fmt::Display for QuizType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

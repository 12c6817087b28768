use phf::phf_map;

/// 各 CEFR 等级对应的词汇、句长与时态要求
static LEVEL_PROFILES: phf::Map<&'static str, &'static str> = phf_map! {
    "A1" => "Vocabulary: very basic everyday words. \
             Sentences: very short and simple (5–8 words). \
             Tenses: present simple; avoid complex clauses; no passive.",
    "A2" => "Vocabulary: basic everyday with simple time words. \
             Sentences: short (8–12 words). \
             Tenses: present simple/past simple; limited adjectives; no conditionals.",
    "B1" => "Vocabulary: common academic and daily-life words. \
             Sentences: medium length (10–16 words). \
             Tenses: present/past/simple future; some connectors (because/so/but).",
    "B2" => "Vocabulary: upper-intermediate; use paraphrase when needed. \
             Sentences: medium-long (12–20 words). \
             Tenses: mix of present, past, present perfect; clear cohesion.",
};

/// CEFR 等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum Level {
    A1,
    A2,
    #[default]
    B1,
    B2,
}

impl Level {
    /// 获取等级代码
    pub fn code(self) -> &'static str {
        match self {
            Level::A1 => "A1",
            Level::A2 => "A2",
            Level::B1 => "B1",
            Level::B2 => "B2",
        }
    }

    /// 从字符串解析等级（忽略大小写和首尾空白）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A1" => Some(Level::A1),
            "A2" => Some(Level::A2),
            "B1" => Some(Level::B1),
            "B2" => Some(Level::B2),
            _ => None,
        }
    }

    /// 出题时需要遵守的等级描述
    pub fn profile(self) -> &'static str {
        LEVEL_PROFILES
            .get(self.code())
            .copied()
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Level::parse("b2"), Some(Level::B2));
        assert_eq!(Level::parse(" A1 "), Some(Level::A1));
        assert_eq!(Level::parse("C1"), None);
    }

    #[test]
    fn test_every_level_has_profile() {
        for level in [Level::A1, Level::A2, Level::B1, Level::B2] {
            assert!(level.profile().starts_with("Vocabulary:"), "{} 缺少描述", level);
        }
    }
}

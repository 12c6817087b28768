//! 文档块与段落样式
//!
//! `StyledBlock` 是逐行分类后的结果，`Paragraph` 是交给渲染器的中性段落描述。

/// 标题默认文本
pub const DEFAULT_TITLE: &str = "Generated Quiz";
/// 答案区块的固定标题
pub const ANSWER_KEY_HEADER: &str = "ANSWER KEY";

/// 单行题目文本的分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyledBlock {
    /// 文档标题
    Title(String),
    /// 空行
    Spacer,
    /// 答案区块标题
    AnswerKeyHeader,
    /// 答案区块中的一行（原样输出）
    AnswerLine(String),
    /// 带编号的题目，`number` 不含末尾的 `.`
    Question { number: String, text: String },
    /// 选项，`marker` 形如 `A)`、`B.`、`(C)`
    Choice { marker: String, text: String },
    /// 普通文本
    Plain(String),
}

/// 文字片段
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    /// 字号（磅），`None` 表示使用默认字号
    pub size_pt: Option<f32>,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            size_pt: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn size(mut self, pt: f32) -> Self {
        self.size_pt = Some(pt);
        self
    }
}

/// 带样式的段落
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub space_before_pt: Option<f32>,
    pub space_after_pt: Option<f32>,
    /// 左缩进（英寸）
    pub left_indent_in: Option<f32>,
}

impl Paragraph {
    fn with_runs(runs: Vec<Run>) -> Self {
        Self {
            runs,
            ..Default::default()
        }
    }

    fn before(mut self, pt: f32) -> Self {
        self.space_before_pt = Some(pt);
        self
    }

    fn after(mut self, pt: f32) -> Self {
        self.space_after_pt = Some(pt);
        self
    }

    fn indent(mut self, inches: f32) -> Self {
        self.left_indent_in = Some(inches);
        self
    }

    /// 段落的纯文本内容
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

impl StyledBlock {
    /// 转换为带样式的段落
    pub fn paragraph(&self) -> Paragraph {
        match self {
            StyledBlock::Title(title) => {
                Paragraph::with_runs(vec![Run::plain(title).bold().size(16.0)]).after(12.0)
            }
            StyledBlock::Spacer => Paragraph::with_runs(Vec::new()).after(6.0),
            StyledBlock::AnswerKeyHeader => {
                Paragraph::with_runs(vec![Run::plain(ANSWER_KEY_HEADER).bold().size(12.0)])
                    .before(12.0)
                    .after(6.0)
            }
            StyledBlock::AnswerLine(line) | StyledBlock::Plain(line) => {
                Paragraph::with_runs(vec![Run::plain(line)]).after(3.0)
            }
            StyledBlock::Question { number, text } => Paragraph::with_runs(vec![
                Run::plain(format!("{}. ", number)).bold().size(11.0),
                Run::plain(text).size(11.0),
            ])
            .before(6.0)
            .after(3.0),
            StyledBlock::Choice { marker, text } => {
                Paragraph::with_runs(vec![Run::plain(format!("{} {}", marker, text))])
                    .indent(0.25)
                    .after(2.0)
            }
        }
    }
}

//! 错误类型。

use crate::utok;

/// 词表构造失败。
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// 词表文件不可读。
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// 某一行不是合法的 utf-8。
    #[error("vocab line {line} is not valid utf-8")]
    Utf8 {
        /// 从 1 开始的行号。
        line: usize,
    },

    /// 词表中没有任何词。
    #[error("vocab is empty")]
    Empty,
}

/// 词或词序号不在词表中。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("token {0:?} is not in vocab")]
    Token(String),

    #[error("token id {0} is out of vocab")]
    Id(utok),
}

/// 自定义数词规则无法编译。
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("numeral pattern is empty")]
    EmptyPattern,

    /// 字面部分含有阿拉伯数字，替换结果可能被同一规则再次匹配。
    #[error("numeral pattern {0:?} contains an ascii digit")]
    DigitLiteral(String),

    /// 模板引用了不存在的捕获组。
    #[error("template placeholder {{{index}}} exceeds {captures} captures")]
    Placeholder { index: usize, captures: usize },

    #[error("malformed template {template:?} at byte {pos}")]
    Template { template: String, pos: usize },

    #[error(transparent)]
    Regex(#[from] regex::Error),
}

/// 大小写配置与预训练检查点不一致。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "`lower_case = {lower_case}` conflicts with checkpoint `{model}`, \
     which is a {expected} model"
)]
pub struct CaseMismatch {
    pub lower_case: bool,
    pub model: String,
    pub expected: &'static str,
}

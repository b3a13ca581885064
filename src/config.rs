use crate::{error::CaseMismatch, wordpiece::WordPiece};
use regex::Regex;
use std::sync::LazyLock;

/// 分词器的配置。
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TokenizerConfig {
    /// 是否转为小写并去掉重音。
    pub lower_case: bool,
    /// 清理时是否丢弃标点。
    pub strip_punctuation: bool,
    /// 是否把所有数字替换为 `0`。
    pub mask_digits: bool,
    /// 未知词。
    pub unk_token: String,
    /// 非词首片段的前缀。
    pub continuation_prefix: String,
    /// 超过这个字符数的词直接视为未知词。
    pub max_input_chars_per_word: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            lower_case: true,
            strip_punctuation: true,
            mask_digits: false,
            unk_token: WordPiece::DEFAULT_UNK.into(),
            continuation_prefix: WordPiece::DEFAULT_PREFIX.into(),
            max_input_chars_per_word: WordPiece::DEFAULT_MAX_CHARS,
        }
    }
}

impl TokenizerConfig {
    pub fn with_lower_case(mut self, lower_case: bool) -> Self {
        self.lower_case = lower_case;
        self
    }

    pub fn with_strip_punctuation(mut self, strip: bool) -> Self {
        self.strip_punctuation = strip;
        self
    }

    pub fn with_mask_digits(mut self, mask: bool) -> Self {
        self.mask_digits = mask;
        self
    }

    pub fn with_unk_token(mut self, unk: impl Into<String>) -> Self {
        self.unk_token = unk.into();
        self
    }

    pub fn with_continuation_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.continuation_prefix = prefix.into();
        self
    }

    pub fn with_max_input_chars_per_word(mut self, max: usize) -> Self {
        self.max_input_chars_per_word = max;
        self
    }
}

const LOWER_MODELS: &[&str] = &[
    "uncased_L-24_H-1024_A-16",
    "uncased_L-12_H-768_A-12",
    "multilingual_L-12_H-768_A-12",
    "chinese_L-12_H-768_A-12",
];

const CASED_MODELS: &[&str] = &[
    "cased_L-12_H-768_A-12",
    "cased_L-24_H-1024_A-16",
    "multi_cased_L-12_H-768_A-12",
];

/// 根据检查点路径中的模型名检查大小写配置。
///
/// 大小写信息并没有保存在检查点里，只能按已知的预训练模型名推断。
/// 路径为空或者不是已知模型时不做检查。
pub fn validate_case_matches_checkpoint(
    lower_case: bool,
    checkpoint: &str,
) -> Result<(), CaseMismatch> {
    static MODEL: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^.*?([A-Za-z0-9_-]+)/bert_model.ckpt").unwrap());

    let Some(model) = MODEL.captures(checkpoint).and_then(|c| c.get(1)) else {
        return Ok(());
    };
    let model = model.as_str();

    let expected = if lower_case && CASED_MODELS.contains(&model) {
        "cased"
    } else if !lower_case && LOWER_MODELS.contains(&model) {
        "lowercased"
    } else {
        return Ok(());
    };
    Err(CaseMismatch {
        lower_case,
        model: model.into(),
        expected,
    })
}

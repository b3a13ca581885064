//! BERT 风格的分词器，带有中文数词改写。
//!
//! 文本依次经过数词改写、清理与基本切分，再由 wordpiece 分解为词表中的片段，
//! 最后映射为词序号交给下游的分类模型。

#![deny(warnings)]

mod basic;
mod chars;
mod config;
mod error;
mod numeral;
mod tokenizer;
mod vocab;
mod wordpiece;

pub use basic::{split_on_punctuation, strip_accents, whitespace_tokenize, BasicTokenizer};
pub use chars::{is_cjk, is_control, is_punctuation, is_whitespace};
pub use config::{validate_case_matches_checkpoint, TokenizerConfig};
pub use error::{CaseMismatch, LoadError, LookupError, RuleError};
pub use numeral::{
    chinese_to_number, digit_value, number_to_chinese, NumeralNormalizer, NumeralRule, Template,
    DIGIT_PLACEHOLDER,
};
pub use tokenizer::{Mode, Tokenizer};
pub use vocab::{Vocab, VocabSource};
pub use wordpiece::WordPiece;

/// `utok` for token id.
#[allow(non_camel_case_types)]
pub type utok = u32;

/// 把基本分词得到的一个词进一步切分。
pub trait Method {
    fn segment<'a>(&'a self, word: &'a str) -> impl IntoIterator<Item = &'a str> + 'a;
}

/// 把词切分为单个字符，不查词表，因此没有未知词。
pub struct CharSplit;

impl Method for CharSplit {
    #[inline]
    fn segment<'a>(&'a self, word: &'a str) -> impl IntoIterator<Item = &'a str> + 'a {
        word.char_indices().map(|(i, c)| &word[i..][..c.len_utf8()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_split() {
        let chars = CharSplit.segment("中a文").into_iter().collect::<Vec<_>>();
        assert_eq!(chars, ["中", "a", "文"]);
        assert!(CharSplit.segment("").into_iter().next().is_none());
    }
}

//! 基本分词：清理文本、改写数词、隔开汉字、大小写折叠和标点切分。

use crate::{
    chars::{is_cjk, is_control, is_punctuation, is_whitespace},
    numeral::NumeralNormalizer,
};
use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;

/// 去掉首尾空白后按空白切分。
pub fn whitespace_tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// 分解为规范形式并去掉所有非间距组合符，即去掉重音。
pub fn strip_accents(text: &str) -> String {
    text.nfd()
        .filter(|&c| get_general_category(c) != GeneralCategory::NonspacingMark)
        .collect()
}

/// 连续的非标点字符组成一段，每个标点字符单独成为一段。
pub fn split_on_punctuation(text: &str) -> Vec<&str> {
    let mut ans = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        if is_punctuation(c) {
            if let Some(s) = start.take() {
                ans.push(&text[s..i]);
            }
            ans.push(&text[i..][..c.len_utf8()]);
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        ans.push(&text[s..]);
    }
    ans
}

/// 基本分词器。
///
/// 步骤的顺序是固定的：清理 → 数词改写 → 汉字加空格 → 空白切分 →（小写与去重音）→
/// 标点切分 → 重新拼接并切分。交换任意两步都会改变混合汉字和标点的输入的结果。
#[derive(Clone, Debug)]
pub struct BasicTokenizer {
    numerals: NumeralNormalizer,
    lower_case: bool,
    strip_punctuation: bool,
    mask_digits: bool,
}

impl Default for BasicTokenizer {
    fn default() -> Self {
        Self::new(NumeralNormalizer::default(), true)
    }
}

impl BasicTokenizer {
    pub fn new(numerals: NumeralNormalizer, lower_case: bool) -> Self {
        Self {
            numerals,
            lower_case,
            strip_punctuation: true,
            mask_digits: false,
        }
    }

    /// 清理时是否丢弃标点。不丢弃时，标点在标点切分一步成为单独的词。
    pub fn with_strip_punctuation(mut self, strip: bool) -> Self {
        self.strip_punctuation = strip;
        self
    }

    /// 数词改写后是否把每个数字替换为 `0`。
    pub fn with_mask_digits(mut self, mask: bool) -> Self {
        self.mask_digits = mask;
        self
    }

    /// 替换数词改写规则。
    pub fn with_numerals(mut self, numerals: NumeralNormalizer) -> Self {
        self.numerals = numerals;
        self
    }

    #[inline]
    pub fn lower_case(&self) -> bool {
        self.lower_case
    }

    #[inline]
    pub fn strip_punctuation(&self) -> bool {
        self.strip_punctuation
    }

    #[inline]
    pub fn mask_digits(&self) -> bool {
        self.mask_digits
    }

    #[inline]
    pub fn numerals(&self) -> &NumeralNormalizer {
        &self.numerals
    }

    pub fn clean_and_split(&self, text: &str) -> Vec<String> {
        let text = self.clean(text);
        let text = self.numerals.normalize(&text);
        let text = if self.mask_digits {
            mask_digits(&text)
        } else {
            text
        };
        let text = pad_cjk(&text);

        let mut split = Vec::new();
        for token in whitespace_tokenize(&text) {
            if self.lower_case {
                let token = strip_accents(&token.to_lowercase());
                split.extend(split_on_punctuation(&token).into_iter().map(str::to_string));
            } else {
                split.extend(split_on_punctuation(token).into_iter().map(str::to_string));
            }
        }

        whitespace_tokenize(&split.join(" "))
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// 去掉空字符、替换字符和控制字符，把空白统一为空格。
    fn clean(&self, text: &str) -> String {
        text.chars()
            .filter(|&c| {
                !(c == '\0'
                    || c == char::REPLACEMENT_CHARACTER
                    || is_control(c)
                    || (self.strip_punctuation && is_punctuation(c)))
            })
            .map(|c| if is_whitespace(c) { ' ' } else { c })
            .collect()
    }
}

fn mask_digits(text: &str) -> String {
    text.chars()
        .map(|c| {
            if get_general_category(c) == GeneralCategory::DecimalNumber {
                '0'
            } else {
                c
            }
        })
        .collect()
}

/// 在每个汉字前后加空格。
fn pad_cjk(text: &str) -> String {
    let mut ans = String::with_capacity(text.len());
    for c in text.chars() {
        if is_cjk(c) {
            ans.push(' ');
            ans.push(c);
            ans.push(' ');
        } else {
            ans.push(c);
        }
    }
    ans
}

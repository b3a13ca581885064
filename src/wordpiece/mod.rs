//! 贪心最长匹配的 wordpiece 分词。

use crate::{utok, vocab::Vocab, Method};

pub struct WordPiece {
    /// 词表
    vocab: Vocab,
    /// 无法分解的词用这个词代替
    unk: String,
    /// 非开头的片段带有这个前缀
    prefix: String,
    /// 字符数超过这个值的词直接视为无法分解
    max_chars: usize,
}

impl WordPiece {
    pub const DEFAULT_UNK: &'static str = "[UNK]";
    pub const DEFAULT_PREFIX: &'static str = "##";
    pub const DEFAULT_MAX_CHARS: usize = 200;

    pub fn new(vocab: Vocab) -> Self {
        Self::with_options(
            vocab,
            Self::DEFAULT_UNK,
            Self::DEFAULT_PREFIX,
            Self::DEFAULT_MAX_CHARS,
        )
    }

    pub fn with_options(
        vocab: Vocab,
        unk: impl Into<String>,
        prefix: impl Into<String>,
        max_chars: usize,
    ) -> Self {
        let unk = unk.into();
        if !vocab.contains(&unk) {
            log::warn!("unknown token {unk:?} is not in vocab, its id cannot be looked up");
        }
        Self {
            vocab,
            unk,
            prefix: prefix.into(),
            max_chars,
        }
    }

    #[inline]
    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }

    /// 无法分解的词被替换成的未知词。
    #[inline]
    pub fn unk_token(&self) -> &str {
        &self.unk
    }

    #[inline]
    pub fn continuation_prefix(&self) -> &str {
        &self.prefix
    }

    #[inline]
    pub fn max_input_chars_per_word(&self) -> usize {
        self.max_chars
    }

    /// 把一个词分解为词表中的片段。
    ///
    /// 从词首开始，每次取词表中从当前位置开始的最长片段，非词首的片段带有续接前缀。
    /// 某个位置找不到任何片段时，整个词替换为一个未知词，已经取出的片段全部丢弃。
    pub fn segment(&self, word: &str) -> Vec<&str> {
        if word.chars().count() > self.max_chars {
            log::trace!("word of {} chars exceeds limit", word.chars().count());
            return vec![self.unk.as_str()];
        }

        let mut pieces = Vec::new();
        let mut key = String::with_capacity(self.prefix.len() + word.len());
        let mut rest = word;
        while !rest.is_empty() {
            // 非词首的片段带前缀查找，前缀本身不算匹配
            let skip = if pieces.is_empty() { 0 } else { self.prefix.len() };
            key.clear();
            if skip > 0 {
                key.push_str(&self.prefix);
            }
            key.push_str(rest);

            match self.vocab.longest_prefix(&key) {
                Some((len, id)) if len > skip => {
                    pieces.push(self.piece(id));
                    rest = &rest[len - skip..];
                }
                _ => {
                    log::trace!("no piece for {rest:?} in {word:?}");
                    return vec![self.unk.as_str()];
                }
            }
        }
        pieces
    }

    #[inline]
    fn piece(&self, id: utok) -> &str {
        // 前缀树中的词序号都来自词表
        self.vocab.token(id).unwrap_or(&self.unk)
    }
}

impl Method for WordPiece {
    #[inline]
    fn segment<'a>(&'a self, word: &'a str) -> impl IntoIterator<Item = &'a str> + 'a {
        WordPiece::segment(self, word)
    }
}

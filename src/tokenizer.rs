use crate::{
    basic::BasicTokenizer,
    config::TokenizerConfig,
    error::{LoadError, LookupError},
    numeral::NumeralNormalizer,
    utok,
    vocab::{Vocab, VocabSource},
    wordpiece::WordPiece,
    CharSplit, Method,
};

/// 分词方式。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Mode {
    /// 基本分词后再用 wordpiece 分解，用于分类。
    #[default]
    WordPiece,
    /// 基本分词后拆成单个字符，不查词表，用于序列标注。
    Char,
}

/// 端到端的分词器，持有词表及其反向映射。
///
/// 构造后只读，可以在多个线程间共享。
pub struct Tokenizer {
    basic: BasicTokenizer,
    wordpiece: WordPiece,
}

impl Tokenizer {
    pub fn new(vocab: Vocab, config: &TokenizerConfig) -> Self {
        let basic = BasicTokenizer::new(NumeralNormalizer::default(), config.lower_case)
            .with_strip_punctuation(config.strip_punctuation)
            .with_mask_digits(config.mask_digits);
        let wordpiece = WordPiece::with_options(
            vocab,
            &*config.unk_token,
            &*config.continuation_prefix,
            config.max_input_chars_per_word,
        );
        log::debug!(
            "tokenizer ready: {} tokens, lower_case = {}",
            wordpiece.vocab().len(),
            config.lower_case,
        );
        Self { basic, wordpiece }
    }

    pub fn from_source(
        source: impl Into<VocabSource>,
        config: &TokenizerConfig,
    ) -> Result<Self, LoadError> {
        Ok(Self::new(Vocab::load(source.into())?, config))
    }

    /// 替换数词改写规则。
    pub fn with_numerals(mut self, numerals: NumeralNormalizer) -> Self {
        self.basic = self.basic.with_numerals(numerals);
        self
    }

    #[inline]
    pub fn vocab(&self) -> &Vocab {
        self.wordpiece.vocab()
    }

    #[inline]
    pub fn unk_token(&self) -> &str {
        self.wordpiece.unk_token()
    }

    #[inline]
    pub fn basic(&self) -> &BasicTokenizer {
        &self.basic
    }

    #[inline]
    pub fn wordpiece(&self) -> &WordPiece {
        &self.wordpiece
    }

    /// 只做数词改写，结果交给其他按文本匹配的组件。
    #[inline]
    pub fn normalize(&self, text: &str) -> String {
        self.basic.numerals().normalize(text)
    }

    pub fn tokenize(&self, text: &str, mode: Mode) -> Vec<String> {
        let words = self.basic.clean_and_split(text);
        match mode {
            Mode::WordPiece => split_with(&self.wordpiece, &words),
            Mode::Char => split_with(&CharSplit, &words),
        }
    }

    pub fn tokens_to_ids<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<utok>, LookupError> {
        let vocab = self.vocab();
        tokens
            .iter()
            .map(|t| {
                let t = t.as_ref();
                vocab.id(t).ok_or_else(|| LookupError::Token(t.into()))
            })
            .collect()
    }

    pub fn ids_to_tokens(&self, ids: &[utok]) -> Result<Vec<&str>, LookupError> {
        let vocab = self.vocab();
        ids.iter()
            .map(|&id| vocab.token(id).ok_or(LookupError::Id(id)))
            .collect()
    }

    /// 分词并映射为词序号。
    pub fn encode(&self, text: &str, mode: Mode) -> Result<Vec<utok>, LookupError> {
        self.tokens_to_ids(&self.tokenize(text, mode))
    }

    /// 把词序号映射回词，用空格连接。
    pub fn decode(&self, ids: &[utok]) -> Result<String, LookupError> {
        Ok(self.ids_to_tokens(ids)?.join(" "))
    }
}

fn split_with<M: Method>(method: &M, words: &[String]) -> Vec<String> {
    words
        .iter()
        .flat_map(|w| method.segment(w).into_iter().map(str::to_string))
        .collect()
}

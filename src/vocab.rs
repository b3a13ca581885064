//! 这个模块提供词表的加载和查询。
//!
//! 词表来自按行排列的词序列，词序号即行号。构造后不可修改，可以在多个线程间共享只读使用。

use crate::{error::LoadError, utok};
use patricia_tree::PatriciaMap;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// 词表的来源。
///
/// 每种来源都是有序的词序列，词序号由位置决定，不接受显式指定的、不连续的词序号。
#[derive(Clone, Debug)]
pub enum VocabSource {
    /// 已经在内存中的词序列。
    Inline(Vec<String>),
    /// utf-8 文本文件，每行一个词。
    Path(PathBuf),
    /// utf-8 文本，每行一个词。
    Bytes(Vec<u8>),
}

impl From<Vec<String>> for VocabSource {
    #[inline]
    fn from(value: Vec<String>) -> Self {
        Self::Inline(value)
    }
}

impl From<PathBuf> for VocabSource {
    #[inline]
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl From<&Path> for VocabSource {
    #[inline]
    fn from(value: &Path) -> Self {
        Self::Path(value.to_path_buf())
    }
}

pub struct Vocab {
    /// 保存所有词的字符串内容，重复的部分只保存一次
    text: Box<str>,
    /// 按词序号保存每个词在 `text` 中的位置
    slices: Box<[(u32, u32)]>,
    /// 词到词序号的前缀树，重复的词以最后一次出现为准
    trie: PatriciaMap<utok>,
}

impl Vocab {
    pub fn load(source: VocabSource) -> Result<Self, LoadError> {
        match source {
            VocabSource::Inline(tokens) => Self::new(tokens.iter().map(|t| t.trim())),
            VocabSource::Path(path) => {
                log::debug!("loading vocab from {}", path.display());
                Self::from_txt(&fs::read(path)?)
            }
            VocabSource::Bytes(bytes) => Self::from_txt(&bytes),
        }
    }

    /// 解析每行一个词的 utf-8 文本。每行去掉首尾空白，末尾的换行可有可无。
    pub fn from_txt(txt: &[u8]) -> Result<Self, LoadError> {
        let mut lines = Vec::new();
        let mut start = 0;
        for end in memchr::memchr_iter(b'\n', txt).chain([txt.len()]) {
            if start == txt.len() {
                break;
            }
            let line = std::str::from_utf8(&txt[start..end]).map_err(|_| LoadError::Utf8 {
                line: lines.len() + 1,
            })?;
            lines.push(line.trim());
            start = end + 1;
        }
        Self::new(lines)
    }

    pub fn new<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Result<Self, LoadError> {
        let tokens = tokens.into_iter().collect::<Vec<_>>();
        if tokens.is_empty() {
            return Err(LoadError::Empty);
        }

        let CompressedVocab { text, slices } = CompressedVocab::new(&tokens);

        let mut trie = PatriciaMap::new();
        let mut duplicates = 0;
        for (i, token) in tokens.iter().enumerate() {
            if trie.insert(*token, i as utok).is_some() {
                duplicates += 1;
                log::warn!("duplicate token {token:?} at line {}", i + 1);
            }
        }

        log::debug!(
            "built vocab: {} tokens, {duplicates} duplicates, {} bytes compressed to {}",
            tokens.len(),
            tokens.iter().map(|t| t.len()).sum::<usize>(),
            text.len(),
        );

        Ok(Self { text, slices, trie })
    }

    /// 词表中的词数，包括重复的词。
    #[inline]
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// token -> token id
    #[inline]
    pub fn id(&self, token: &str) -> Option<utok> {
        self.trie.get(token).copied()
    }

    /// token id -> token
    #[inline]
    pub fn token(&self, id: utok) -> Option<&str> {
        let &(off, len) = self.slices.get(id as usize)?;
        Some(&self.text[off as usize..][..len as usize])
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.trie.contains_key(token)
    }

    /// 在词表中查找 `text` 最长的非空前缀，返回前缀的字节数和词序号。
    pub fn longest_prefix(&self, text: &str) -> Option<(usize, utok)> {
        self.trie
            .get_longest_common_prefix(text.as_bytes())
            .filter(|(pre, _)| !pre.is_empty())
            .map(|(pre, &id)| (pre.len(), id))
    }

    /// 按词序号遍历所有词。
    pub fn iter(&self) -> impl Iterator<Item = (utok, &str)> + '_ {
        (0..self.len() as utok).filter_map(|id| self.token(id).map(|t| (id, t)))
    }
}

/// 利用词表中的重复部分压缩词表。
struct CompressedVocab {
    text: Box<str>,
    slices: Box<[(u32, u32)]>,
}

impl CompressedVocab {
    fn new(tokens: &[&str]) -> Self {
        let total_len = tokens.iter().map(|t| t.len()).sum();
        let mut slices = vec![(0u32, 0u32); tokens.len()];
        let mut text = String::with_capacity(total_len);
        let mut indices = (0..tokens.len()).collect::<Vec<_>>();
        // 对词按内容长度从长到短排序，因为短的内容有可能是长内容的子串，可以避免重复存储相同内容
        indices.sort_unstable_by_key(|&i| std::cmp::Reverse(tokens[i].len()));
        for i in indices {
            let t = tokens[i];
            // 完整的 utf-8 序列只会在字符边界上匹配
            let off = memchr::memmem::find(text.as_bytes(), t.as_bytes()).unwrap_or_else(|| {
                let off = text.len();
                text.push_str(t);
                off
            });
            slices[i] = (off as u32, t.len() as u32);
        }
        Self {
            text: text.into_boxed_str(),
            slices: slices.into_boxed_slice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_lines() {
        let vocab = Vocab::from_txt("[PAD]\n[UNK]\nun\n##aff\n##able\n".as_bytes()).unwrap();
        assert_eq!(vocab.len(), 5);
        assert_eq!(vocab.id("[UNK]"), Some(1));
        assert_eq!(vocab.id("##able"), Some(4));
        assert_eq!(vocab.token(3), Some("##aff"));
        assert_eq!(vocab.token(5), None);
        assert_eq!(vocab.id("able"), None);
    }

    #[test]
    fn lines_are_trimmed() {
        let vocab = Vocab::from_txt(b"a\r\n  b \n\nc").unwrap();
        assert_eq!(
            vocab.iter().collect::<Vec<_>>(),
            [(0, "a"), (1, "b"), (2, ""), (3, "c")]
        );
    }

    #[test]
    fn duplicates_last_wins() {
        let vocab = Vocab::new(["x", "y", "x"]).unwrap();
        assert_eq!(vocab.id("x"), Some(2));
        assert_eq!(vocab.token(0), Some("x"));
        assert_eq!(vocab.token(2), Some("x"));
    }

    #[test]
    fn shared_storage() {
        let vocab = Vocab::new(["able", "##able", "ab", "中文", "文"]).unwrap();
        for (id, token) in ["able", "##able", "ab", "中文", "文"].into_iter().enumerate() {
            assert_eq!(vocab.token(id as utok), Some(token));
        }
        assert_eq!(vocab.text.len(), "##able".len() + "中文".len());
    }

    #[test]
    fn longest_prefix() {
        let vocab = Vocab::new(["", "un", "una", "##aff"]).unwrap();
        assert_eq!(vocab.longest_prefix("unaffable"), Some((3, 2)));
        assert_eq!(vocab.longest_prefix("##affable"), Some((5, 3)));
        assert_eq!(vocab.longest_prefix("xyz"), None);
    }

    #[test]
    fn load_errors() {
        assert!(matches!(Vocab::from_txt(b""), Err(LoadError::Empty)));
        assert!(matches!(
            Vocab::from_txt(b"ok\n\xff\xfe\n"),
            Err(LoadError::Utf8 { line: 2 })
        ));
        assert!(matches!(
            Vocab::load(VocabSource::Path("/nonexistent/vocab.txt".into())),
            Err(LoadError::Io(_))
        ));
    }
}

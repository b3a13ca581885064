//! 单个字符的分类。
//!
//! 这些判断互不依赖，也不依赖上下文，分词流程中每一步都只按字符调用它们。

use unicode_general_category::{get_general_category, GeneralCategory as Gc};

/// 空格、`\t`、`\n`、`\r` 以及所有 `Zs` 类字符。
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r') || get_general_category(c) == Gc::SpaceSeparator
}

/// `Cc` 和 `Cf` 类字符。
///
/// `\t`、`\n`、`\r` 虽然属于 `Cc`，但已经当作空白处理，这里不再算作控制字符。
pub fn is_control(c: char) -> bool {
    if matches!(c, '\t' | '\n' | '\r') {
        return false;
    }
    matches!(get_general_category(c), Gc::Control | Gc::Format)
}

/// 所有非字母数字的可见 ASCII 字符，以及所有 `P*` 类字符。
///
/// `^`、`$`、`` ` `` 等在 Unicode 中属于符号而非标点，为了切分一致也当作标点。
pub fn is_punctuation(c: char) -> bool {
    if matches!(c as u32, 33..=47 | 58..=64 | 91..=96 | 123..=126) {
        return true;
    }
    matches!(
        get_general_category(c),
        Gc::ConnectorPunctuation
            | Gc::DashPunctuation
            | Gc::OpenPunctuation
            | Gc::ClosePunctuation
            | Gc::InitialPunctuation
            | Gc::FinalPunctuation
            | Gc::OtherPunctuation
    )
}

/// CJK 统一表意文字及其扩展区。
///
/// 韩文和日文假名不在其中：它们用空格分词，按其他语言的方式处理。
pub const fn is_cjk(c: char) -> bool {
    matches!(
        c as u32,
        0x4E00..=0x9FFF
            | 0x3400..=0x4DBF
            | 0x20000..=0x2A6DF
            | 0x2A700..=0x2B73F
            | 0x2B740..=0x2B81F
            | 0x2B820..=0x2CEAF
            | 0xF900..=0xFAFF
            | 0x2F800..=0x2FA1F
    )
}

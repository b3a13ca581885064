//! 把中文数词改写为阿拉伯数字。
//!
//! 改写由一组有序规则完成。每条规则是一个数词模式和一个算式模板，
//! 规则按数词语法从细到粗排列（百十个、百十、十个、十、个），
//! 每条规则反复作用到不再匹配为止，再轮到下一条。

mod template;
mod value;

use crate::error::RuleError;
use regex::{Captures, Regex};
use std::sync::LazyLock;

pub use template::Template;
pub use value::{chinese_to_number, number_to_chinese};

/// 模式中代表一个数字字符的占位符。
pub const DIGIT_PLACEHOLDER: &str = "{n}";

const DIGIT_CLASS: &str = "([零一二两三四五六七八九])";

/// 内置规则，顺序即优先级。
const RULES: &[(&str, &str)] = &[
    ("{n}百{n}十{n}", "{0}*100+{1}*10+{2}*1"), // 三百二十一
    ("{n}百零{n}", "{0}*100+{1}*1"),           // 三百零一
    ("{n}百{n}十", "{0}*100+{1}*10"),          // 三百二十
    ("{n}百{n}", "{0}*100+{1}*10"),            // 三百二
    ("{n}百", "{0}*100"),                      // 三百
    ("{n}十{n}", "{0}*10+{1}*1"),              // 二十一
    ("{n}十", "{0}*10"),                       // 二十
    ("十{n}", "1*10+{0}*1"),                   // 十一
    ("十", "1*10"),                            // 十
    ("{n}", "{0}*1"),                          // 一
];

static CHINESE: LazyLock<NumeralNormalizer> =
    LazyLock::new(|| NumeralNormalizer::new(RULES.iter().copied()).unwrap());

/// 单个数字字符的值。“两”与“二”同值。
pub const fn digit_value(c: char) -> Option<u64> {
    Some(match c {
        '零' => 0,
        '一' => 1,
        '二' | '两' => 2,
        '三' => 3,
        '四' => 4,
        '五' => 5,
        '六' => 6,
        '七' => 7,
        '八' => 8,
        '九' => 9,
        _ => return None,
    })
}

/// 一条改写规则。
#[derive(Clone, Debug)]
pub struct NumeralRule {
    regex: Regex,
    template: Template,
}

impl NumeralRule {
    /// 编译一条规则。
    ///
    /// `pattern` 中的 `{n}` 匹配并捕获一个数字字符，其余部分按字面匹配，
    /// 且不能含有阿拉伯数字，以保证替换结果不会再被规则匹配。
    /// `template` 中的 `{i}` 引用第 i 个捕获的数字。
    pub fn new(pattern: &str, template: &str) -> Result<Self, RuleError> {
        if pattern.is_empty() {
            return Err(RuleError::EmptyPattern);
        }
        if pattern.bytes().any(|b| b.is_ascii_digit()) {
            return Err(RuleError::DigitLiteral(pattern.into()));
        }

        let mut regex = String::new();
        let mut captures = 0;
        for (i, literal) in pattern.split(DIGIT_PLACEHOLDER).enumerate() {
            if i > 0 {
                regex.push_str(DIGIT_CLASS);
                captures += 1;
            }
            regex.push_str(&regex::escape(literal));
        }

        let template = Template::parse(template)?;
        if template.placeholders() > captures {
            return Err(RuleError::Placeholder {
                index: template.placeholders() - 1,
                captures,
            });
        }

        Ok(Self {
            regex: Regex::new(&regex)?,
            template,
        })
    }

    /// 在文本中找最靠前的匹配，返回匹配到的原文和改写后的值。
    fn find<'t>(&self, text: &'t str) -> Option<(&'t str, u64)> {
        let caps = self.regex.captures(text)?;
        let value = self.eval(&caps)?;
        Some((caps.get(0)?.as_str(), value))
    }

    fn eval(&self, caps: &Captures) -> Option<u64> {
        let args = caps
            .iter()
            .skip(1)
            .map(|m| m.and_then(|m| m.as_str().chars().next()).and_then(digit_value))
            .collect::<Option<Vec<_>>>()?;
        self.template.eval(&args)
    }
}

/// 有序的数词改写规则集。
///
/// 构造后只读，可以在多个线程间共享。
#[derive(Clone, Debug)]
pub struct NumeralNormalizer {
    rules: Box<[NumeralRule]>,
}

impl Default for NumeralNormalizer {
    fn default() -> Self {
        CHINESE.clone()
    }
}

impl NumeralNormalizer {
    /// 按给定顺序编译一组 `(pattern, template)` 规则。
    pub fn new<'a>(rules: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self, RuleError> {
        let rules = rules
            .into_iter()
            .map(|(pattern, template)| NumeralRule::new(pattern, template))
            .collect::<Result<_, _>>()?;
        Ok(Self { rules })
    }

    #[inline]
    pub fn rules(&self) -> &[NumeralRule] {
        &self.rules
    }

    /// 依次应用每条规则直到不再匹配。
    ///
    /// 一次匹配会替换文本中所有与匹配原文相同的片段，
    /// 因此同一数词在不同位置出现时总是得到相同的结果。
    pub fn normalize(&self, text: &str) -> String {
        let mut text = text.to_string();
        for rule in &*self.rules {
            while let Some((key, value)) = rule.find(&text) {
                let key = key.to_string();
                let value = value.to_string();
                log::trace!("numeral {key} -> {value}");
                text = text.replace(&key, &value);
            }
        }
        text
    }
}

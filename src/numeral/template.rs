use crate::error::RuleError;

/// 由 `+`、`*`、整数字面量和 `{i}` 占位符组成的算式，如 `{0}*100+{1}*10`。
///
/// 构造时解析为积之和，求值时用捕获的数字代入占位符。
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Template {
    terms: Box<[Box<[Factor]>]>,
    placeholders: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Factor {
    Literal(u64),
    Placeholder(usize),
}

impl Template {
    pub fn parse(template: &str) -> Result<Self, RuleError> {
        let err = |pos| RuleError::Template {
            template: template.into(),
            pos,
        };

        let bytes = template.as_bytes();
        let mut terms = Vec::new();
        let mut factors = Vec::new();
        let mut placeholders = 0;
        let mut i = 0;
        loop {
            // 因子
            let factor = match bytes.get(i) {
                Some(b'{') => {
                    let start = i + 1;
                    let len = bytes[start..]
                        .iter()
                        .position(|&b| b == b'}')
                        .ok_or_else(|| err(i))?;
                    let index = template[start..][..len].parse::<usize>().map_err(|_| err(start))?;
                    let count = index.checked_add(1).ok_or_else(|| err(start))?;
                    placeholders = placeholders.max(count);
                    i = start + len + 1;
                    Factor::Placeholder(index)
                }
                Some(b) if b.is_ascii_digit() => {
                    let start = i;
                    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
                        i += 1;
                    }
                    let value = template[start..i].parse::<u64>().map_err(|_| err(start))?;
                    Factor::Literal(value)
                }
                _ => return Err(err(i)),
            };
            factors.push(factor);
            // 运算符
            match bytes.get(i) {
                Some(b'*') => {}
                Some(b'+') => terms.push(std::mem::take(&mut factors).into_boxed_slice()),
                None => {
                    terms.push(factors.into_boxed_slice());
                    break;
                }
                Some(_) => return Err(err(i)),
            }
            i += 1;
        }

        Ok(Self {
            terms: terms.into_boxed_slice(),
            placeholders,
        })
    }

    /// 模板引用的捕获组数量，即最大占位符序号加一。
    #[inline]
    pub fn placeholders(&self) -> usize {
        self.placeholders
    }

    /// 代入参数求值，溢出或参数不足时返回 `None`。
    pub fn eval(&self, args: &[u64]) -> Option<u64> {
        self.terms.iter().try_fold(0u64, |sum, term| {
            let product = term.iter().try_fold(1u64, |product, factor| {
                let value = match *factor {
                    Factor::Literal(v) => v,
                    Factor::Placeholder(i) => *args.get(i)?,
                };
                product.checked_mul(value)
            })?;
            sum.checked_add(product)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_positional() {
        let t = Template::parse("{0}*100+{1}*10+{2}*1").unwrap();
        assert_eq!(t.placeholders(), 3);
        assert_eq!(t.eval(&[3, 2, 1]), Some(321));

        let t = Template::parse("1*10+{0}*1").unwrap();
        assert_eq!(t.placeholders(), 1);
        assert_eq!(t.eval(&[1]), Some(11));

        let t = Template::parse("1*10").unwrap();
        assert_eq!(t.placeholders(), 0);
        assert_eq!(t.eval(&[]), Some(10));
    }

    #[test]
    fn eval_missing_or_overflow() {
        let t = Template::parse("{1}").unwrap();
        assert_eq!(t.eval(&[7]), None);

        let t = Template::parse("{0}*18446744073709551615").unwrap();
        assert_eq!(t.eval(&[2]), None);
    }

    #[test]
    fn malformed() {
        for bad in [
            "",
            "+1",
            "1+",
            "{0",
            "{x}",
            "1-2",
            "2**3",
            "{0} ",
            "{18446744073709551615}",
        ] {
            assert!(
                matches!(Template::parse(bad), Err(RuleError::Template { .. })),
                "{bad:?}"
            );
        }
    }
}

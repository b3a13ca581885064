use super::digit_value;

const DIGITS: [char; 10] = ['零', '一', '二', '三', '四', '五', '六', '七', '八', '九'];
const UNITS: [(char, u64); 3] = [('千', 1000), ('百', 100), ('十', 10)];

fn unit_value(c: char) -> Option<u64> {
    UNITS.iter().find(|&&(u, _)| u == c).map(|&(_, v)| v)
}

/// 解析一个完整的中文数词，如 `三千零五十`、`十五`、`两百`。
///
/// 单位必须从大到小出现；紧跟在千、百之后的末位数字按口语理解为下一位，
/// 即 `三百五` 为 350。不是合法数词时返回 `None`。
pub fn chinese_to_number(text: &str) -> Option<u64> {
    let mut total = 0u64;
    let mut digit = None;
    let mut zero = false;
    let mut last_unit = None::<u64>;

    for c in text.chars() {
        if c == '零' {
            if digit.is_some() {
                return None;
            }
            zero = true;
        } else if let Some(d) = digit_value(c) {
            if digit.is_some() {
                return None;
            }
            digit = Some(d);
        } else if let Some(unit) = unit_value(c) {
            if last_unit.is_some_and(|last| unit >= last) {
                return None;
            }
            // 只有“十”可以省略开头的“一”
            let d = match digit.take() {
                Some(d) => d,
                None if unit == 10 && last_unit.is_none() && !zero => 1,
                None => return None,
            };
            total += d * unit;
            last_unit = Some(unit);
            zero = false;
        } else {
            return None;
        }
    }

    match (digit, last_unit) {
        (Some(d), Some(unit)) if unit > 10 && !zero => Some(total + d * unit / 10),
        (Some(d), _) => Some(total + d),
        (None, Some(_)) => Some(total),
        (None, None) if zero => Some(0),
        (None, None) => None,
    }
}

/// 把 0 到 9999 之间的整数写成中文数词，超出范围返回 `None`。
///
/// 十几省略开头的“一”，中间连续的零只写一个，末尾的零不写。
pub fn number_to_chinese(n: u64) -> Option<String> {
    if n > 9999 {
        return None;
    }
    if n == 0 {
        return Some(DIGITS[0].to_string());
    }

    let places = [(n / 1000, "千"), (n / 100 % 10, "百"), (n / 10 % 10, "十"), (n % 10, "")];
    let mut ans = String::new();
    let mut zero = false;
    for (i, (d, unit)) in places.into_iter().enumerate() {
        if d == 0 {
            zero = !ans.is_empty();
            continue;
        }
        if zero {
            ans.push(DIGITS[0]);
            zero = false;
        }
        if !(i == 2 && d == 1 && ans.is_empty()) {
            ans.push(DIGITS[d as usize]);
        }
        ans.push_str(unit);
    }
    Some(ans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!(chinese_to_number("十"), Some(10));
        assert_eq!(chinese_to_number("十五"), Some(15));
        assert_eq!(chinese_to_number("四十四"), Some(44));
        assert_eq!(chinese_to_number("两百"), Some(200));
        assert_eq!(chinese_to_number("一百零五"), Some(105));
        assert_eq!(chinese_to_number("三千零五十"), Some(3050));
        assert_eq!(chinese_to_number("三百五"), Some(350));
        assert_eq!(chinese_to_number("九"), Some(9));
        assert_eq!(chinese_to_number("零"), Some(0));
    }

    #[test]
    fn parse_rejects() {
        for bad in ["", "五五", "百", "十百", "百三千", "三十a", "二十分钟"] {
            assert_eq!(chinese_to_number(bad), None, "{bad:?}");
        }
    }

    #[test]
    fn render() {
        assert_eq!(number_to_chinese(0).as_deref(), Some("零"));
        assert_eq!(number_to_chinese(10).as_deref(), Some("十"));
        assert_eq!(number_to_chinese(15).as_deref(), Some("十五"));
        assert_eq!(number_to_chinese(110).as_deref(), Some("一百一十"));
        assert_eq!(number_to_chinese(105).as_deref(), Some("一百零五"));
        assert_eq!(number_to_chinese(1050).as_deref(), Some("一千零五十"));
        assert_eq!(number_to_chinese(1005).as_deref(), Some("一千零五"));
        assert_eq!(number_to_chinese(3000).as_deref(), Some("三千"));
        assert_eq!(number_to_chinese(10000), None);
    }

    #[test]
    fn render_then_parse() {
        for n in 0..=9999 {
            let text = number_to_chinese(n).unwrap();
            assert_eq!(chinese_to_number(&text), Some(n), "{text}");
        }
    }
}

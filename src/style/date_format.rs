//! Date display formats for the article and movie cards.

use chrono::{DateTime, Datelike, TimeZone, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

/// How a card renders its date line. Unknown tags decode to `Standard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DateFormat {
    /// `2024-03-05`
    #[default]
    Standard,
    /// `03-05`
    ShortDate,
    /// `2024年03月05日`
    LongDate,
    /// `2024年03月05日 14:30`
    FullDate,
    /// `03-05 14:30`
    WithTime,
    /// `03-05 星期二`
    WithWeekday,
}

impl DateFormat {
    pub const ALL: [DateFormat; 6] = [
        Self::Standard,
        Self::ShortDate,
        Self::LongDate,
        Self::FullDate,
        Self::WithTime,
        Self::WithWeekday,
    ];

    /// Label shown in the format picker.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Standard => "标准格式",
            Self::ShortDate => "短日期",
            Self::LongDate => "长日期",
            Self::FullDate => "完整日期",
            Self::WithTime => "带时间",
            Self::WithWeekday => "带星期",
        }
    }

    pub fn format<Tz>(&self, date: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let pattern = match self {
            Self::Standard => "%Y-%m-%d",
            Self::ShortDate => "%m-%d",
            Self::LongDate => "%Y年%m月%d日",
            Self::FullDate => "%Y年%m月%d日 %H:%M",
            Self::WithTime => "%m-%d %H:%M",
            Self::WithWeekday => {
                return format!("{} {}", date.format("%m-%d"), weekday_name(date.weekday()));
            }
        };
        date.format(pattern).to_string()
    }
}

impl<'de> Deserialize<'de> for DateFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.as_str() {
            "shortDate" => Self::ShortDate,
            "longDate" => Self::LongDate,
            "fullDate" => Self::FullDate,
            "withTime" => Self::WithTime,
            "withWeekday" => Self::WithWeekday,
            _ => Self::Standard,
        })
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "星期一",
        Weekday::Tue => "星期二",
        Weekday::Wed => "星期三",
        Weekday::Thu => "星期四",
        Weekday::Fri => "星期五",
        Weekday::Sat => "星期六",
        Weekday::Sun => "星期日",
    }
}

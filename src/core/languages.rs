//! Language code table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages understood by the API.
///
/// Discriminants start at 1 so that 0 can stand for "unset" in raw values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum Language {
    #[serde(rename = "BG")]
    Bulgarian = 1,
    #[serde(rename = "CS")]
    Czech,
    #[serde(rename = "DA")]
    Danish,
    #[serde(rename = "DE")]
    German,
    #[serde(rename = "EL")]
    Greek,
    #[serde(rename = "EN")]
    English,
    #[serde(rename = "ES")]
    Spanish,
    #[serde(rename = "ET")]
    Estonian,
    #[serde(rename = "FI")]
    Finnish,
    #[serde(rename = "FR")]
    French,
    #[serde(rename = "HU")]
    Hungarian,
    #[serde(rename = "ID")]
    Indonesian,
    #[serde(rename = "IT")]
    Italian,
    #[serde(rename = "JA")]
    Japanese,
    #[serde(rename = "LT")]
    Lithuanian,
    #[serde(rename = "LV")]
    Latvian,
    #[serde(rename = "NL")]
    Dutch,
    #[serde(rename = "PL")]
    Polish,
    #[serde(rename = "PT")]
    Portuguese,
    #[serde(rename = "RO")]
    Romanian,
    #[serde(rename = "RU")]
    Russian,
    #[serde(rename = "SK")]
    Slovak,
    #[serde(rename = "SL")]
    Slovenian,
    #[serde(rename = "SV")]
    Swedish,
    #[serde(rename = "TR")]
    Turkish,
    #[serde(rename = "ZH")]
    Chinese,
}

impl Language {
    pub const ALL: [Language; 26] = [
        Language::Bulgarian,
        Language::Czech,
        Language::Danish,
        Language::German,
        Language::Greek,
        Language::English,
        Language::Spanish,
        Language::Estonian,
        Language::Finnish,
        Language::French,
        Language::Hungarian,
        Language::Indonesian,
        Language::Italian,
        Language::Japanese,
        Language::Lithuanian,
        Language::Latvian,
        Language::Dutch,
        Language::Polish,
        Language::Portuguese,
        Language::Romanian,
        Language::Russian,
        Language::Slovak,
        Language::Slovenian,
        Language::Swedish,
        Language::Turkish,
        Language::Chinese,
    ];

    /// Two-letter code sent to the API
    pub fn code(&self) -> &'static str {
        match self {
            Language::Bulgarian => "BG",
            Language::Czech => "CS",
            Language::Danish => "DA",
            Language::German => "DE",
            Language::Greek => "EL",
            Language::English => "EN",
            Language::Spanish => "ES",
            Language::Estonian => "ET",
            Language::Finnish => "FI",
            Language::French => "FR",
            Language::Hungarian => "HU",
            Language::Indonesian => "ID",
            Language::Italian => "IT",
            Language::Japanese => "JA",
            Language::Lithuanian => "LT",
            Language::Latvian => "LV",
            Language::Dutch => "NL",
            Language::Polish => "PL",
            Language::Portuguese => "PT",
            Language::Romanian => "RO",
            Language::Russian => "RU",
            Language::Slovak => "SK",
            Language::Slovenian => "SL",
            Language::Swedish => "SV",
            Language::Turkish => "TR",
            Language::Chinese => "ZH",
        }
    }

    /// English name
    pub fn name(&self) -> &'static str {
        match self {
            Language::Bulgarian => "Bulgarian",
            Language::Czech => "Czech",
            Language::Danish => "Danish",
            Language::German => "German",
            Language::Greek => "Greek",
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::Estonian => "Estonian",
            Language::Finnish => "Finnish",
            Language::French => "French",
            Language::Hungarian => "Hungarian",
            Language::Indonesian => "Indonesian",
            Language::Italian => "Italian",
            Language::Japanese => "Japanese",
            Language::Lithuanian => "Lithuanian",
            Language::Latvian => "Latvian",
            Language::Dutch => "Dutch",
            Language::Polish => "Polish",
            Language::Portuguese => "Portuguese",
            Language::Romanian => "Romanian",
            Language::Russian => "Russian",
            Language::Slovak => "Slovak",
            Language::Slovenian => "Slovenian",
            Language::Swedish => "Swedish",
            Language::Turkish => "Turkish",
            Language::Chinese => "Chinese",
        }
    }
}

/// Code for a raw enum value; 0 and unknown values give ""
pub fn language_code(raw: i32) -> &'static str {
    Language::try_from(raw).map(|l| l.code()).unwrap_or("")
}

impl TryFrom<i32> for Language {
    type Error = i32;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        Language::ALL
            .iter()
            .copied()
            .find(|l| *l as i32 == raw)
            .ok_or(raw)
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Language::ALL
            .iter()
            .copied()
            .find(|l| l.code().eq_ignore_ascii_case(wanted) || l.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unsupported language: {}", s))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_a_bijection() {
        let codes: HashSet<&str> = Language::ALL.iter().map(|l| l.code()).collect();
        assert_eq!(codes.len(), Language::ALL.len());

        for lang in Language::ALL {
            assert_eq!(lang.code().len(), 2);
            assert_eq!(lang.code().parse::<Language>().unwrap(), lang);
        }
    }

    #[test]
    fn test_raw_values() {
        assert_eq!(language_code(0), "");
        assert_eq!(language_code(27), "");
        assert_eq!(language_code(-3), "");
        assert_eq!(language_code(1), "BG");
        assert_eq!(language_code(26), "ZH");
        for (i, lang) in Language::ALL.iter().enumerate() {
            assert_eq!(language_code(i as i32 + 1), lang.code());
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("de".parse::<Language>().unwrap(), Language::German);
        assert_eq!("Japanese".parse::<Language>().unwrap(), Language::Japanese);
        assert!("xx".parse::<Language>().is_err());
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Language::Greek).unwrap(), "\"EL\"");
        let lang: Language = serde_json::from_str("\"SV\"").unwrap();
        assert_eq!(lang, Language::Swedish);
    }
}

use std::convert::Infallible;
use std::str::FromStr;

static RU_SPEAKING_LOCALES: [&str; 3] = ["ru", "uk", "be"];

#[derive(Debug, Clone, Eq, PartialEq, derive_more::Display)]
pub struct LanguageCode(String);

#[derive(Hash, Copy, Clone, Eq, PartialEq, Debug, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SupportedLanguage {
    EN,
    RU,
}

impl LanguageCode {
    pub fn of(value: impl ToString) -> Self {
        Self(value.to_string())
    }

    /// Picks the sender's language if the client reported one, the fallback otherwise.
    pub fn from_maybe_string(maybe_code: Option<&str>, fallback: &LanguageCode) -> Self {
        maybe_code
            .filter(|code| !code.is_empty())
            .map(Self::of)
            .unwrap_or_else(|| fallback.clone())
    }

    pub fn to_supported_language(&self) -> SupportedLanguage {
        let code = self.0.to_ascii_lowercase();
        match code.get(..2) {
            Some(prefix) if RU_SPEAKING_LOCALES.contains(&prefix) => SupportedLanguage::RU,
            _ => SupportedLanguage::EN,
        }
    }

    /// The key of the translation file to use.
    pub fn locale(&self) -> String {
        self.to_supported_language().to_string()
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::of("en")
    }
}

impl FromStr for LanguageCode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::of(s))
    }
}

#[cfg(test)]
mod test_from_maybe_string {
    use super::LanguageCode;
    use super::SupportedLanguage::{EN, RU};

    #[test]
    fn success() {
        let ru = [
            "RU", "ru", "Ru", "rU", "ru-RU", "RU-ru", "rU-Ru", "Ru-rU",
            "BE", "be", "Be", "bE", "be-BY", "BE-by", "bE-By", "Be-bY",
            "uk", "uk-UA"
        ].map(|code| (code, RU));
        let en = [
            "EN", "en", "En", "eN", "en-US", "EN-us", "eN-Us", "En-uS",
            "c", "C", "POSIX", "aé", "é", "éru", "рус"
        ].map(|code| (code, EN));
        let cases = ru.into_iter().chain(en);
        let fallback = LanguageCode::of("ru");

        for (case, expected) in cases {
            let result = LanguageCode::from_maybe_string(Some(case), &fallback);
            assert_eq!(result.to_supported_language(), expected, "Case: {case}, result: {result:?}")
        }
    }

    #[test]
    fn fallback() {
        let fallback = LanguageCode::of("ru");
        for case in [Some(""), None] {
            let result = LanguageCode::from_maybe_string(case, &fallback);
            assert_eq!(result.to_supported_language(), RU);
            assert_eq!(result.locale(), "ru");
        }
    }
}

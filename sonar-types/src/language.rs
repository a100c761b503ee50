/// Languages a creative can be rendered in.
///
/// Unknown or absent codes fall back to English.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    Malay,
    Chinese,
    Japanese,
    Korean,
}

impl Language {
    /// All languages, in the order offered by the survey form.
    pub const ALL: [Language; 7] = [
        Self::English,
        Self::Spanish,
        Self::French,
        Self::Malay,
        Self::Chinese,
        Self::Japanese,
        Self::Korean,
    ];

    /// The 2-letter code stored in survey documents.
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::Malay => "ms",
            Self::Chinese => "zh",
            Self::Japanese => "ja",
            Self::Korean => "ko",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// Resolve an optional code, falling back to English.
    pub fn resolve(code: Option<&str>) -> Self {
        code.and_then(Self::from_code).unwrap_or_default()
    }

    /// Shown once the respondent has finished.
    pub fn thank_you_text(self) -> &'static str {
        match self {
            Self::English => "Thank You",
            Self::Spanish => "Gracias",
            Self::French => "Merci",
            Self::Malay => "Terima Kasih",
            Self::Chinese => "谢谢",
            Self::Japanese => "ありがとうございました",
            Self::Korean => "고맙습니다",
        }
    }

    /// Label of the button that advances a multiple-option question.
    pub fn next_text(self) -> &'static str {
        match self {
            Self::English => "Next",
            Self::Spanish => "Próxima",
            Self::French => "Suivante",
            Self::Malay => "Next",
            Self::Chinese => "下一个",
            Self::Japanese => "次へ",
            Self::Korean => "다음에",
        }
    }

    /// Hint shown under multiple-option questions.
    pub fn comment_text(self) -> &'static str {
        match self {
            Self::English => "Choose all applicable",
            Self::Spanish => "Elige todas las aplicables",
            Self::French => "Choisissez tout ce qui s'applique",
            Self::Malay => "Pilih semua yang berkenaan",
            Self::Chinese => "选择所有适用的",
            Self::Japanese => "当てはまるもの全て選択",
            Self::Korean => "적용 가능한 모든 항목을 선택하십시오",
        }
    }
}

pub fn get_thank_you_text(code: Option<&str>) -> &'static str {
    Language::resolve(code).thank_you_text()
}

pub fn get_next_text(code: Option<&str>) -> &'static str {
    Language::resolve(code).next_text()
}

pub fn get_comment_text(code: Option<&str>) -> &'static str {
    Language::resolve(code).comment_text()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_code() {
        assert_eq!(get_thank_you_text(Some("fr")), "Merci");
        assert_eq!(get_next_text(Some("ja")), "次へ");
        assert_eq!(get_comment_text(Some("es")), "Elige todas las aplicables");
    }

    #[test]
    fn unknown_or_absent_code_falls_back_to_english() {
        assert_eq!(get_thank_you_text(Some("de")), "Thank You");
        assert_eq!(get_thank_you_text(None), "Thank You");
        assert_eq!(get_next_text(Some("")), "Next");
    }

    #[test]
    fn codes_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
    }
}

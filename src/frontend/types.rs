/// Page color scheme. Purely cosmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
    Vivid,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Vivid];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Vivid => "Vivid",
        }
    }

    /// Unknown names fall back to the default theme.
    pub fn from_name(name: &str) -> Theme {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_default()
    }

    pub fn bg_color(self) -> &'static str {
        match self {
            Theme::Light => "#ffffff",
            Theme::Dark => "#1e1e1e",
            Theme::Vivid => "#ffcc00",
        }
    }

    pub fn text_color(self) -> &'static str {
        match self {
            Theme::Light => "#000000",
            Theme::Dark => "#ffffff",
            Theme::Vivid => "#000066",
        }
    }

    pub fn style(self) -> String {
        format!(
            "background-color: {}; color: {};",
            self.bg_color(),
            self.text_color()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_names() {
        assert_eq!(Theme::default(), Theme::Dark);
        for theme in Theme::ALL {
            assert_eq!(Theme::from_name(theme.name()), theme);
        }
        assert_eq!(Theme::from_name("vivid"), Theme::Vivid);
        assert_eq!(Theme::from_name("Sepia"), Theme::Dark);
    }

    #[test]
    fn test_theme_style() {
        assert_eq!(
            Theme::Vivid.style(),
            "background-color: #ffcc00; color: #000066;"
        );
    }
}

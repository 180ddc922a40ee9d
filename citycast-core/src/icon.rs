//! OpenWeather condition icon URLs.

pub const DEFAULT_ICON_BASE_URL: &str = "https://openweathermap.org";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconSize {
    /// 50x50
    Small,
    /// 100x100
    #[default]
    Double,
    /// 200x200
    Quad,
}

impl IconSize {
    fn suffix(self) -> &'static str {
        match self {
            IconSize::Small => "",
            IconSize::Double => "@2x",
            IconSize::Quad => "@4x",
        }
    }
}

/// Build the image URL for an icon identifier such as "10d".
pub fn icon_url(base_url: &str, icon: &str, size: IconSize) -> String {
    format!("{}/img/wn/{}{}.png", base_url.trim_end_matches('/'), icon, size.suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_default_size_url() {
        assert_eq!(
            icon_url(DEFAULT_ICON_BASE_URL, "10d", IconSize::default()),
            "https://openweathermap.org/img/wn/10d@2x.png"
        );
    }

    #[test]
    fn small_has_no_suffix_and_trailing_slash_is_ignored() {
        assert_eq!(
            icon_url("http://localhost:8080/", "01n", IconSize::Small),
            "http://localhost:8080/img/wn/01n.png"
        );
        assert_eq!(
            icon_url(DEFAULT_ICON_BASE_URL, "04d", IconSize::Quad),
            "https://openweathermap.org/img/wn/04d@4x.png"
        );
    }
}

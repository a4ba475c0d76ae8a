use serde::Deserialize;
use std::fmt;

/// A wrapper for secrets (passwords) that masks its value in Debug and Display output.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> Masked<T> {
    pub fn expose(&self) -> &T {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_hides_value() {
        let secret = Masked("DevRev@12".to_string());
        assert_eq!(format!("{:?}", secret), "********");
        assert_eq!(format!("{}", secret), "********");
        assert_eq!(secret.expose(), "DevRev@12");
    }

    #[test]
    fn test_masked_deserializes_transparently() {
        let secret: Masked<String> = serde_json::from_str(r#""pw""#).unwrap();
        assert_eq!(secret.expose(), "pw");
    }
}

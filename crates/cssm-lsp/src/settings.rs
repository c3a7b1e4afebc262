use cssm_index::CamelCaseOption;
use serde::{Deserialize, Serialize};

/// Editor settings shared by the providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderSettings {
    pub camel_case: CamelCaseOption,
}

impl ProviderSettings {
    pub fn new(camel_case: CamelCaseOption) -> Self {
        ProviderSettings { camel_case }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_editor_settings() {
        let settings: ProviderSettings =
            serde_json::from_str(r#"{"camelCase": "dashes"}"#).unwrap();
        assert_eq!(settings.camel_case, CamelCaseOption::Dashes);

        let settings: ProviderSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, ProviderSettings::default());
    }
}

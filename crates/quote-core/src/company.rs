//! Company profile shown in document chrome and on the company page

use std::path::PathBuf;

/// Static company data, constructed once and shared read-only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyProfile {
    pub name: String,
    pub ceo: String,
    pub address: String,
    pub tel: String,
    pub fax: String,
    pub mobile: String,
    pub email_primary: String,
    pub email_secondary: String,
    pub website: String,
    /// Construction business license text
    pub license: String,
    /// Logo drawn in the page header; may not exist on disk
    pub logo_path: PathBuf,
}

impl CompanyProfile {
    pub fn sugimotoya(logo_path: impl Into<PathBuf>) -> Self {
        Self {
            name: "株式会社 SUGIMOTOYA".to_string(),
            ceo: "杉本 直樹".to_string(),
            address: "〒192-0014 東京都八王子市みつい台2-2-8".to_string(),
            tel: "TEL 042-649-7565".to_string(),
            fax: "FAX 042-649-7566".to_string(),
            mobile: "携帯 090-4133-6276".to_string(),
            email_primary: "info@sugimotoya-co.jp".to_string(),
            email_secondary: "n.sugimoto@sugimotoya-co.jp".to_string(),
            website: "sugimotoya-rehome.com".to_string(),
            license: "東京都知事 許可(般-3)第152475号 内外装リフォーム工事一式".to_string(),
            logo_path: logo_path.into(),
        }
    }

    /// Contact line printed in every page footer
    pub fn footer_line(&self) -> String {
        [
            self.address.as_str(),
            self.tel.as_str(),
            self.fax.as_str(),
            self.mobile.as_str(),
            self.website.as_str(),
        ]
        .join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_line_joins_contacts() {
        let company = CompanyProfile::sugimotoya("assets/logo.jpg");
        assert_eq!(
            company.footer_line(),
            "〒192-0014 東京都八王子市みつい台2-2-8 | TEL 042-649-7565 | FAX 042-649-7566 | 携帯 090-4133-6276 | sugimotoya-rehome.com"
        );
    }
}

use serde::{Deserialize, Serialize};

/// Prevention guide shown to citizens, grouped by hazard category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guide {
    pub id: String,
    #[serde(rename = "titre")]
    pub title: String,
    #[serde(rename = "contenu")]
    pub body: String,
    #[serde(rename = "categorie")]
    pub category: String,
    #[serde(rename = "dateCreation")]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGuide {
    #[serde(rename = "titre")]
    pub title: String,
    #[serde(rename = "contenu")]
    pub body: String,
    #[serde(rename = "categorie")]
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidePatch {
    #[serde(rename = "titre")]
    pub title: Option<String>,
    #[serde(rename = "contenu")]
    pub body: Option<String>,
    #[serde(rename = "categorie")]
    pub category: Option<String>,
}

impl GuidePatch {
    pub fn apply_to(self, guide: &mut Guide) {
        if let Some(v) = self.title {
            guide.title = v;
        }
        if let Some(v) = self.body {
            guide.body = v;
        }
        if let Some(v) = self.category {
            guide.category = v;
        }
    }
}

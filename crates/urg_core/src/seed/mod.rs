use serde::{Deserialize, Serialize};

use crate::domain::NewGuide;
use crate::error::AppError;
use crate::repo::Store;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedSummary {
    pub inserted: usize,
    /// `true` when guides already existed and nothing was written.
    pub skipped: bool,
}

/// One prevention guide per hazard category.
pub fn reference_guides() -> Vec<NewGuide> {
    vec![
        NewGuide {
            title: "Que faire en cas d'incendie".to_string(),
            body: [
                "1. Alertez immédiatement les pompiers (198)",
                "2. Ne prenez pas l'ascenseur",
                "3. Fermez les portes derrière vous",
                "4. Si la fumée est dense, rampez au sol",
                "5. Ne retournez jamais dans un bâtiment en feu",
                "6. Utilisez un extincteur uniquement si vous savez comment l'utiliser",
            ]
            .join("\n"),
            category: "INCENDIE".to_string(),
        },
        NewGuide {
            title: "Que faire en cas de séisme".to_string(),
            body: [
                "1. Restez calme et ne paniquez pas",
                "2. Mettez-vous à l'abri sous une table solide ou un encadrement de porte",
                "3. Éloignez-vous des fenêtres et des objets qui peuvent tomber",
                "4. Si vous êtes à l'extérieur, éloignez-vous des bâtiments",
                "5. Après le séisme, vérifiez les fuites de gaz et d'eau",
                "6. Écoutez la radio pour les instructions officielles",
            ]
            .join("\n"),
            category: "SEISME".to_string(),
        },
        NewGuide {
            title: "Premiers gestes de secours".to_string(),
            body: [
                "1. Sécurisez la zone (évitez le sur-accident)",
                "2. Vérifiez la conscience de la victime",
                "3. Appelez les secours (198 pour les pompiers, 190 pour la police)",
                "4. Si la personne est inconsciente, placez-la en position latérale de sécurité",
                "5. En cas d'hémorragie, comprimez la plaie",
                "6. Ne donnez jamais à boire à une personne inconsciente",
            ]
            .join("\n"),
            category: "PREMIERS_SECOURS".to_string(),
        },
    ]
}

/// Populate the guide collection with [`reference_guides`] if, and only if, it is empty.
///
/// Runs at application start. Once any guide exists this is a no-op, so the reference set is
/// seeded at most once over the lifetime of a store. An unreadable guide collection is left
/// untouched and also counts as skipped.
pub fn seed_reference_guides(store: &Store) -> Result<SeedSummary, AppError> {
    let guides = store.guides();
    let empty = match guides.is_empty() {
        Ok(empty) => empty,
        Err(e) if e.code == "STORE_COLLECTION_CORRUPT" => {
            tracing::warn!(error = %e, "guide collection unreadable, seeding skipped");
            false
        }
        Err(e) => return Err(e),
    };
    if !empty {
        tracing::debug!("guides already present, seeding skipped");
        return Ok(SeedSummary {
            inserted: 0,
            skipped: true,
        });
    }

    let mut inserted = 0;
    for guide in reference_guides() {
        guides.create(guide)?;
        inserted += 1;
    }
    tracing::info!(inserted, "seeded reference guides");
    Ok(SeedSummary {
        inserted,
        skipped: false,
    })
}

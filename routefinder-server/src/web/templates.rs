//! Askama templates for the web frontend.

use askama::Template;

use crate::catalog::DatasetOption;
use crate::view::InfoPanel;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Map page with the dataset dropdown.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub options: Vec<DatasetOption>,
    pub info: InfoPanel,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Info panel fragment.
#[derive(Template)]
#[template(path = "info_panel.html")]
pub struct InfoPanelTemplate {
    pub info: InfoPanel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{INFO_PLACEHOLDER, InfoRow};

    #[test]
    fn info_panel_placeholder() {
        let html = InfoPanelTemplate {
            info: InfoPanel::new(vec![]),
        }
        .render()
        .unwrap();

        assert!(html.contains("<h4>Temps de Trajet</h4>"));
        assert!(html.contains(INFO_PLACEHOLDER));
        assert!(!html.contains("<li"));
    }

    #[test]
    fn info_panel_rows() {
        let html = InfoPanelTemplate {
            info: InfoPanel::new(vec![InfoRow {
                mode: "Voiture".into(),
                color: "pink",
                point_name: "Caserne <Nord>".into(),
                duration: "12m".into(),
            }]),
        }
        .render()
        .unwrap();

        assert!(html.contains("color: pink"));
        assert!(html.contains("<strong>Voiture</strong>"));
        assert!(html.contains("Caserne &lt;Nord&gt;"));
        assert!(html.contains("12m"));
        assert!(!html.contains(INFO_PLACEHOLDER));
    }

    #[test]
    fn index_lists_options_in_order() {
        let option = |key: &str, label: &str| DatasetOption {
            key: key.into(),
            label: label.into(),
            zone_source: format!("{key}/zone.fgb"),
            points_source: format!("{key}/points.fgb"),
        };
        let html = IndexTemplate {
            options: vec![option("b", "Lyon - Hôpitaux"), option("a", "Paris - Casernes")],
            info: InfoPanel::new(vec![]),
        }
        .render()
        .unwrap();

        let lyon = html.find("Lyon - Hôpitaux").unwrap();
        let paris = html.find("Paris - Casernes").unwrap();
        assert!(lyon < paris);
        assert!(html.contains(r#"value="b""#));
        assert!(html.contains("id=\"map\""));
    }
}

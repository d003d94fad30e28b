use crate::app_container::Application;
use anyhow::anyhow;
use community::contracts::login::Credentials;
use community::contracts::suggest_event::EventSuggestion;
use community::SessionState;
use heatmap::detail_panel::Viewer;
use heatmap::selection::Interaction;
use heatmap::HeatmapView;
use itertools::Itertools;
use regions::{GovernorateName, RegionCatalog};
use std::path::Path;

pub async fn load_view(app: &Application) -> HeatmapView {
    let mut view = HeatmapView::new(app.catalog.clone());
    println!("{}", view.status_line());
    view.load(&app.fetcher).await;
    view
}

/// Header, legend and one line per governorate in catalog order.
pub fn map_summary(view: &HeatmapView) -> String {
    let legend = view
        .legend()
        .into_iter()
        .map(|(label, color)| format!("  {color}  {label}"));
    let regions = view.join().iter().map(|region| {
        format!(
            "{:<12} {:<10} score {:>3}  events {:>3}",
            region.name(),
            region.classification.tier,
            region.record.score,
            region.record.events_count
        )
    });

    std::iter::once(view.header())
        .chain(std::iter::once(String::new()))
        .chain(legend)
        .chain(std::iter::once(String::new()))
        .chain(regions)
        .join("\n")
}

/// Matches governorate names ignoring case. Anything else is rejected.
pub fn resolve_governorate(catalog: &RegionCatalog, input: &str) -> anyhow::Result<GovernorateName> {
    let input = input.trim();
    catalog
        .names()
        .find(|name| name.inner().eq_ignore_ascii_case(input))
        .cloned()
        .ok_or_else(|| {
            anyhow!(
                "Unknown governorate {input:?}. Expected one of: {}",
                catalog.names().join(", ")
            )
        })
}

pub async fn map(app: &Application, geojson: Option<&Path>) -> anyhow::Result<()> {
    let view = load_view(app).await;
    println!("{}", map_summary(&view));

    if let Some(path) = geojson {
        let rendered = serde_json::to_string_pretty(&view.render_map())?;
        std::fs::write(path, rendered)?;
        tracing::info!(path = %path.display(), "wrote decorated governorate boundaries");
    }
    Ok(())
}

/// Signs in when credentials are given. A failed login is reported and the
/// panel is shown to an anonymous viewer.
async fn sign_in(app: &Application, credentials: Option<Credentials>) -> SessionState {
    let mut session = SessionState::default();
    if let Some(credentials) = credentials {
        match app.login.login(&credentials).await {
            Ok(signed_in) => session.sign_in(signed_in),
            Err(err) => println!("{err}"),
        }
    }
    session
}

pub async fn show(
    app: &Application,
    governorate: &str,
    credentials: Option<Credentials>,
) -> anyhow::Result<()> {
    let name = resolve_governorate(&app.catalog, governorate)?;
    let session = sign_in(app, credentials).await;
    if let Some(greeting) = session.greeting() {
        println!("{greeting}");
    }

    let mut view = load_view(app).await;
    view.handle(Interaction::Click, &name);

    let viewer = if session.is_signed_in() {
        Viewer::SignedIn
    } else {
        Viewer::Anonymous
    };
    println!("{}", view.header());
    println!();
    print!("{}", view.detail_panel(viewer));
    Ok(())
}

pub async fn login(app: &Application, credentials: Credentials) -> anyhow::Result<()> {
    let session = app.login.login(&credentials).await?;
    let mut state = SessionState::default();
    state.sign_in(session);
    if let Some(greeting) = state.greeting() {
        println!("{greeting}");
    }
    Ok(())
}

pub async fn register(app: &Application, credentials: Credentials) -> anyhow::Result<()> {
    let message = app.register.register(&credentials).await?;
    println!("{message}");
    Ok(())
}

pub async fn suggest(
    app: &Application,
    credentials: Credentials,
    suggestion: EventSuggestion,
) -> anyhow::Result<()> {
    let city = resolve_governorate(&app.catalog, &suggestion.city)?;
    let suggestion = EventSuggestion {
        city: city.into(),
        ..suggestion
    };
    let session = app.login.login(&credentials).await?;
    let message = app.suggest_event.suggest(&session, &suggestion).await?;
    println!("{message}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_view, map_summary, resolve_governorate};
    use crate::app_container::Application;
    use httpmock::prelude::*;
    use regions::{GovernorateName, RegionCatalog};
    use rstest::rstest;
    use serde_json::json;
    use url::Url;

    #[rstest]
    #[case("Tunis", "Tunis")]
    #[case("sidi bouzid", "Sidi Bouzid")]
    #[case("  SFAX ", "Sfax")]
    fn test_that_governorates_are_resolved_ignoring_case(#[case] input: &str, #[case] expected: &str) {
        let catalog = RegionCatalog::load().unwrap();

        let name = resolve_governorate(&catalog, input).unwrap();

        assert_eq!(name, GovernorateName::from(expected));
    }

    #[test]
    fn test_that_unknown_governorates_are_rejected() {
        let catalog = RegionCatalog::load().unwrap();

        let err = resolve_governorate(&catalog, "Atlantis").unwrap_err();

        assert!(err.to_string().starts_with("Unknown governorate \"Atlantis\""));
    }

    #[tokio::test]
    async fn test_that_map_summary_lists_every_governorate() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/heatmap/");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "success": true,
                        "data": [{ "governorate": "Nabeul", "score": 5, "color": "#f97316", "events_count": 3, "events": [] }]
                    }));
            })
            .await;
        let app = Application::new(Url::parse(&server.base_url()).unwrap()).unwrap();

        let view = load_view(&app).await;
        let summary = map_summary(&view);

        assert!(summary.starts_with("Showing nightlife activity levels for "));
        assert!(summary.contains("#3b82f6  Low (0)"));
        assert!(summary.contains("Nabeul       High       score   5  events   3"));
        assert!(summary.contains("Tataouine    Low        score   0  events   0"));
        assert_eq!(summary.lines().filter(|line| line.contains(" score ")).count(), 24);
    }
}

use nd_core::corpus::{builtin_articles, builtin_timeline};
use nd_core::{
    Action, BiasOrientation, DashboardState, FactCheckVerdict, FilterEngine, TierId, View,
    ViewContent,
};

fn fixtures() -> (FilterEngine, Vec<nd_core::TimelineEvent>) {
    let articles = builtin_articles().unwrap();
    let timeline = builtin_timeline(&articles).unwrap();
    (FilterEngine::new(articles), timeline)
}

fn article_ids(content: &ViewContent) -> Vec<String> {
    match content {
        ViewContent::Feed { articles } | ViewContent::Bookmarks { articles } => {
            articles.iter().map(|a| a.id.clone()).collect()
        }
        other => panic!("not an article list: {other:?}"),
    }
}

#[test]
fn bookmarks_view_intersects_current_filters() {
    let (engine, timeline) = fixtures();
    let state = DashboardState::new(TierId::Pro)
        .apply(Action::ToggleBookmark("1".into()))
        .apply(Action::ToggleBookmark("3".into()))
        .apply(Action::SetView(View::Bookmarks));
    let view = state.render(&engine, &timeline);
    assert_eq!(article_ids(&view.content), vec!["1", "3"]);

    let view = state
        .apply(Action::ToggleCategory("Politics".into()))
        .render(&engine, &timeline);
    assert_eq!(article_ids(&view.content), vec!["3"]);
}

#[test]
fn recomputes_from_corpus_after_loosening() {
    let (engine, timeline) = fixtures();
    let state = DashboardState::default().apply(Action::SetQuery("bipartisan".into()));
    assert_eq!(article_ids(&state.render(&engine, &timeline).content), vec!["3"]);

    let state = state.apply(Action::SetQuery(String::new()));
    assert_eq!(
        article_ids(&state.render(&engine, &timeline).content),
        vec!["1", "2", "3", "4", "5"]
    );
}

#[test]
fn downgrade_falls_back_to_feed() {
    let (engine, timeline) = fixtures();
    let state = DashboardState::new(TierId::Enterprise)
        .apply(Action::SetView(View::Timeline))
        .apply(Action::SelectTier(TierId::Basic));
    let view = state.render(&engine, &timeline);
    assert_eq!(view.view, View::Feed);
    assert!(!view.access.has_pro_access);
    assert!(matches!(view.content, ViewContent::Feed { .. }));
}

#[test]
fn advanced_filters_wait_for_pro() {
    let (engine, timeline) = fixtures();
    let state = DashboardState::new(TierId::Basic)
        .apply(Action::ToggleBias(BiasOrientation::Left))
        .apply(Action::ToggleFactCheck(FactCheckVerdict::Verified));
    let view = state.render(&engine, &timeline);
    assert_eq!(article_ids(&view.content), vec!["1", "2", "3", "4", "5"]);
    assert!(view.filters.bias.contains(&BiasOrientation::Left));

    // Basic facets still narrow the feed.
    let view = state
        .clone()
        .apply(Action::ToggleCategory("Politics".into()))
        .render(&engine, &timeline);
    assert_eq!(article_ids(&view.content), vec!["3", "5"]);

    // Upgrading applies the recorded selections.
    let state = state
        .apply(Action::ToggleBias(BiasOrientation::Left))
        .apply(Action::ToggleBias(BiasOrientation::Center))
        .apply(Action::SelectTier(TierId::Pro));
    assert_eq!(article_ids(&state.render(&engine, &timeline).content), vec!["4"]);

    // And downgrading suspends them again.
    let state = state.apply(Action::SelectTier(TierId::Basic));
    assert_eq!(
        article_ids(&state.render(&engine, &timeline).content),
        vec!["1", "2", "3", "4", "5"]
    );
}

#[test]
fn enterprise_sees_timeline_and_analytics() {
    let (engine, timeline) = fixtures();
    let state = DashboardState::new(TierId::Enterprise).apply(Action::SetView(View::Timeline));
    match state.render(&engine, &timeline).content {
        ViewContent::Timeline { events } => assert_eq!(events.len(), 3),
        other => panic!("unexpected content: {other:?}"),
    }

    let state = state.apply(Action::SetView(View::Analytics));
    match state.render(&engine, &timeline).content {
        ViewContent::Analytics { report, .. } => assert_eq!(report.articles, 5),
        other => panic!("unexpected content: {other:?}"),
    }
}

#[test]
fn selected_article_resolves_against_corpus() {
    let (engine, timeline) = fixtures();
    let view = DashboardState::default()
        .apply(Action::SelectArticle("4".into()))
        .render(&engine, &timeline);
    assert_eq!(view.selected_article.map(|a| a.id), Some("4".to_string()));

    let view = DashboardState::default()
        .apply(Action::SelectArticle("missing".into()))
        .render(&engine, &timeline);
    assert!(view.selected_article.is_none());
}

#[test]
fn actions_deserialize_from_json() {
    let action: Action = serde_json::from_str(r#"{"type":"selectTier","value":"pro"}"#).unwrap();
    assert_eq!(action, Action::SelectTier(TierId::Pro));
    let action: Action =
        serde_json::from_str(r#"{"type":"toggleBias","value":"center-left"}"#).unwrap();
    assert_eq!(action, Action::ToggleBias(BiasOrientation::CenterLeft));
    let action: Action = serde_json::from_str(r#"{"type":"clearFilters"}"#).unwrap();
    assert_eq!(action, Action::ClearFilters);
}

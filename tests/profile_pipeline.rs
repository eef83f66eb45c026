//! Stored profile document to rendered page, through the file-backed store

use std::path::Path;

use linkbio::{render_page, HeadlessEvent};
use linkbio_app::config::Settings;
use linkbio_app::services::FileSettingsStore;
use linkbio_app::{load_public_page, PageOutcome};
use linkbio_core::{Background, LayoutType, RenderBlock, TileMedia, Viewport};
use tempfile::TempDir;

/// A loosely shaped record, the way a backend export might look
const ADA: &str = r#"{
  "profile": {"id": "p1", "user_id": "u1", "username": "ada", "display_name": "Ada"},
  "settings": {
    "theme_id": "ocean",
    "is_dark_mode": true,
    "layout_type": "bento",
    "text_shadow": true,
    "background_style": {"id": "custom"},
    "links": [
      {"id": "a", "title": "GitHub", "url": "https://github.com/ada", "icon": "github"},
      {"id": "b", "title": "Shots", "url": "https://shots", "photoUrl": "https://img/1.png"},
      {"id": "c", "title": null, "url": "https://mystery", "icon": "nonexistent-icon"},
      {"id": "d", "title": "Mail", "url": "mailto:ada@example.com", "icon": "mail", "display": "icon"},
      {"title": "No id", "url": "https://noid", "display": "sideways"}
    ]
  }
}"#;

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(format!("{name}.json")), content).unwrap();
}

async fn load(dir: &TempDir) -> linkbio_app::PublicPage {
    let store = FileSettingsStore::new(dir.path());
    match load_public_page(&store, "ada").await {
        PageOutcome::Found(page) => *page,
        PageOutcome::NotFound => panic!("ada should be found"),
    }
}

#[tokio::test]
async fn test_bento_profile_renders_as_grid() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "p1", ADA);
    let page = load(&dir).await;

    let wide = page.render(Viewport::Wide);
    assert_eq!(wide.layout, LayoutType::Bento);
    assert!(wide.text_shadow);
    assert_eq!(wide.item_count(), 5);
    let RenderBlock::Grid { columns, tiles } = &wide.blocks[0] else {
        panic!("bento renders a grid");
    };
    assert_eq!(*columns, 3);

    // Photo wins over the icon in tiles
    assert_eq!(tiles[1].media, Some(TileMedia::Photo("https://img/1.png".into())));
    // Unknown icon keys fall back to the default glyph, null titles to ""
    match &tiles[2].media {
        Some(TileMedia::Glyph(glyph)) => assert!(glyph.is_default()),
        other => panic!("unexpected media {other:?}"),
    }
    assert_eq!(tiles[2].label.as_deref(), Some(""));
    // Icon-only links carry no label
    assert!(tiles[3].label.is_none());
    // Unrecognized display values behave like "both"
    assert_eq!(tiles[4].label.as_deref(), Some("No id"));
    assert!(!tiles[4].link_id.as_str().is_empty());

    let narrow = page.render(Viewport::Narrow);
    assert!(matches!(narrow.blocks[0], RenderBlock::Grid { columns: 2, .. }));
}

#[tokio::test]
async fn test_appearance_resolution() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "p1", ADA);
    let page = load(&dir).await;

    assert_eq!(page.theme().id, "ocean");
    assert_eq!(page.palette(), page.theme().palette(true));
    // A custom background without a URL falls back to the flat theme colour
    assert_eq!(page.background(), Background::ThemeFlat);
}

#[tokio::test]
async fn test_switching_layouts_keeps_every_link_in_order() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "p1", ADA);
    let mut page = load(&dir).await;

    let ids: Vec<String> = page
        .settings
        .links
        .iter()
        .map(|l| l.id.to_string())
        .collect();
    for layout in LayoutType::ALL {
        page.settings.layout_type = layout;
        let tree = page.render(Viewport::Wide);
        let rendered: Vec<String> = tree.link_ids().iter().map(|id| id.to_string()).collect();
        assert_eq!(rendered, ids, "{layout}");
    }

    page.settings.layout_type = LayoutType::Mixed;
    let mixed = page.render(Viewport::Narrow);
    assert_eq!(mixed.featured_count(), 2);
    assert_eq!(mixed.row_count(), 3);
    assert!(matches!(mixed.blocks[0], RenderBlock::Grid { columns: 2, .. }));
}

#[tokio::test]
async fn test_unknown_and_invalid_usernames_are_not_found() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "p1", ADA);
    // An unreadable document next to it is skipped, not fatal
    write(dir.path(), "broken", "{not json");
    let store = FileSettingsStore::new(dir.path());

    assert!(load_public_page(&store, "%40ada").await.page().is_some());
    assert_eq!(load_public_page(&store, "grace").await, PageOutcome::NotFound);
    assert_eq!(load_public_page(&store, "a/b").await, PageOutcome::NotFound);
    assert_eq!(load_public_page(&store, "").await, PageOutcome::NotFound);
}

#[tokio::test]
async fn test_page_command_emits_render_tree() {
    let project = TempDir::new().unwrap();
    let settings = Settings::default();
    let data_dir = settings.storage.data_dir(project.path());
    std::fs::create_dir_all(&data_dir).unwrap();
    write(&data_dir, "p1", ADA);

    let event = render_page(project.path(), &settings, "ada", Some(40)).await;
    let json: serde_json::Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();
    assert_eq!(json["event"], "rendered");
    assert_eq!(json["viewport"], "narrow");
    assert_eq!(json["tree"]["layout"], "bento");
    assert_eq!(json["tree"]["blocks"][0]["columns"], 2);

    let missing = render_page(project.path(), &settings, "nobody", None).await;
    assert!(matches!(missing, HeadlessEvent::PageNotFound { .. }));
}

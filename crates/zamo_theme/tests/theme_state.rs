use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use zamo_prefs::testing::FlakyStore;
use zamo_prefs::{keys, MemoryStore, PreferenceStore};
use zamo_theme::{
    palette_for, ColorScheme, ColorToken, SystemAppearance, ThemeMode, ThemeState,
};

fn memory(entries: &[(&str, &str)]) -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_entries(entries.iter().copied()))
}

async fn stored(store: &MemoryStore) -> Option<String> {
    store.get(keys::THEME_MODE).await.unwrap()
}

#[tokio::test]
async fn starts_in_system_mode_with_host_scheme() {
    let appearance = SystemAppearance::new(ColorScheme::Dark);
    let theme = ThemeState::with_appearance(memory(&[]), &appearance);

    assert_eq!(theme.mode(), ThemeMode::System);
    assert_eq!(theme.scheme(), ColorScheme::Dark);
    assert_eq!(theme.palette(), palette_for(ColorScheme::Dark));
}

#[tokio::test]
async fn system_mode_follows_host_changes() {
    let appearance = SystemAppearance::new(ColorScheme::Light);
    let theme = ThemeState::with_appearance(memory(&[]), &appearance);
    let mut rx = theme.subscribe();

    appearance.set(ColorScheme::Dark);
    tokio::time::timeout(Duration::from_secs(5), rx.changed())
        .await
        .expect("snapshot published")
        .unwrap();

    assert_eq!(theme.scheme(), ColorScheme::Dark);
    assert_eq!(
        theme.palette().color(ColorToken::Background),
        palette_for(ColorScheme::Dark).color(ColorToken::Background)
    );
}

#[tokio::test]
async fn system_mode_follows_host_back_to_light() {
    let appearance = SystemAppearance::new(ColorScheme::Dark);
    let theme = ThemeState::with_appearance(memory(&[]), &appearance);
    assert_eq!(theme.scheme(), ColorScheme::Dark);
    let mut rx = theme.subscribe();

    appearance.set(ColorScheme::Light);
    tokio::time::timeout(Duration::from_secs(5), rx.changed())
        .await
        .expect("snapshot published")
        .unwrap();

    assert_eq!(theme.mode(), ThemeMode::System);
    assert_eq!(theme.scheme(), ColorScheme::Light);
    assert_eq!(theme.palette(), palette_for(ColorScheme::Light));
}

#[tokio::test]
async fn explicit_mode_ignores_host_changes() {
    let appearance = SystemAppearance::new(ColorScheme::Light);
    let theme = ThemeState::with_appearance(memory(&[]), &appearance);
    theme.set_theme_mode(ThemeMode::Light).settled().await;
    let mut rx = theme.subscribe();

    appearance.set(ColorScheme::Dark);
    tokio::time::timeout(Duration::from_secs(5), rx.changed())
        .await
        .expect("snapshot published")
        .unwrap();

    let snap = theme.snapshot();
    assert_eq!(snap.system, ColorScheme::Dark);
    assert_eq!(snap.resolved, ColorScheme::Light);
}

#[tokio::test]
async fn dark_twice_is_same_as_once() {
    let theme = ThemeState::new(memory(&[]), ColorScheme::Light);

    theme.set_theme_mode(ThemeMode::Dark).settled().await;
    let once = theme.palette();
    theme.set_theme_mode(ThemeMode::Dark).settled().await;

    assert_eq!(theme.palette(), once);
    assert_eq!(once.scheme(), ColorScheme::Dark);
}

#[tokio::test]
async fn mode_round_trips_through_store() {
    let mem = memory(&[]);
    let theme = ThemeState::new(mem.clone(), ColorScheme::Light);
    theme.set_theme_mode(ThemeMode::Dark).settled().await;
    assert_eq!(stored(&mem).await.as_deref(), Some("dark"));

    let restarted = ThemeState::new(mem.clone(), ColorScheme::Light);
    assert_eq!(restarted.scheme(), ColorScheme::Light);
    restarted.initialize().settled().await;

    assert_eq!(restarted.mode(), ThemeMode::Dark);
    assert_eq!(restarted.scheme(), ColorScheme::Dark);
    assert!(restarted.snapshot().loaded);
}

#[tokio::test]
async fn unrecognized_stored_mode_keeps_system_and_is_not_rewritten() {
    let mem = memory(&[(keys::THEME_MODE, "sepia")]);
    let theme = ThemeState::new(mem.clone(), ColorScheme::Dark);

    theme.initialize().settled().await;

    assert_eq!(theme.mode(), ThemeMode::System);
    assert_eq!(theme.scheme(), ColorScheme::Dark);
    assert_eq!(stored(&mem).await.as_deref(), Some("sepia"));
}

#[tokio::test]
async fn bad_mode_string_is_ignored() {
    let mem = memory(&[]);
    let theme = ThemeState::new(mem.clone(), ColorScheme::Light);

    theme.set_theme_mode_str("sepia").settled().await;
    assert_eq!(theme.mode(), ThemeMode::System);
    assert_eq!(stored(&mem).await, None);

    theme.set_theme_mode_str("Dark").settled().await;
    assert_eq!(theme.mode(), ThemeMode::Dark);
}

#[tokio::test]
async fn toggle_goes_explicit_from_resolved_scheme() {
    let theme = ThemeState::new(memory(&[]), ColorScheme::Dark);

    theme.toggle().settled().await;
    assert_eq!(theme.mode(), ThemeMode::Light);

    theme.toggle().settled().await;
    assert_eq!(theme.mode(), ThemeMode::Dark);
}

#[tokio::test]
async fn storage_failures_do_not_block_changes() {
    let mem = memory(&[(keys::THEME_MODE, "dark")]);
    let flaky = FlakyStore::shared(mem.clone());
    flaky.fail_reads(true);
    flaky.fail_writes(true);
    let theme = ThemeState::new(flaky.clone(), ColorScheme::Light);

    theme.initialize().settled().await;
    assert_eq!(theme.mode(), ThemeMode::System);
    assert!(theme.snapshot().loaded);

    theme.set_theme_mode(ThemeMode::Light).settled().await;
    assert_eq!(theme.mode(), ThemeMode::Light);
    assert_eq!(stored(&mem).await.as_deref(), Some("dark"));
}

#[tokio::test(start_paused = true)]
async fn explicit_choice_beats_slow_startup_load() {
    let mem = memory(&[(keys::THEME_MODE, "dark")]);
    let flaky = FlakyStore::shared(mem.clone());
    flaky.delay_reads(Duration::from_millis(200));
    let theme = ThemeState::new(flaky.clone(), ColorScheme::Light);

    let load = theme.initialize();
    let set = theme.set_theme_mode(ThemeMode::Light);
    load.settled().await;
    set.settled().await;

    assert_eq!(theme.mode(), ThemeMode::Light);
    assert_eq!(stored(&mem).await.as_deref(), Some("light"));
}

#[tokio::test(start_paused = true)]
async fn last_write_wins() {
    let mem = memory(&[]);
    let flaky = FlakyStore::shared(mem.clone());
    flaky.delay_writes(Duration::from_millis(50));
    let theme = ThemeState::new(flaky.clone(), ColorScheme::Light);

    let writes = vec![
        theme.set_theme_mode(ThemeMode::Dark),
        theme.set_theme_mode(ThemeMode::Light),
        theme.set_theme_mode(ThemeMode::System),
    ];
    for w in writes {
        w.settled().await;
    }

    assert_eq!(theme.mode(), ThemeMode::System);
    assert_eq!(stored(&mem).await.as_deref(), Some("system"));
}

#[tokio::test]
async fn detach_stops_following_host() {
    let appearance = SystemAppearance::new(ColorScheme::Light);
    let theme = ThemeState::with_appearance(memory(&[]), &appearance);

    theme.detach();
    appearance.set(ColorScheme::Dark);
    tokio::task::yield_now().await;

    assert_eq!(theme.scheme(), ColorScheme::Light);
}

#[test]
fn works_in_memory_without_runtime() {
    let appearance = SystemAppearance::new(ColorScheme::Dark);
    let theme = ThemeState::with_appearance(memory(&[]), &appearance);

    assert_eq!(theme.scheme(), ColorScheme::Dark);
    theme.set_theme_mode(ThemeMode::Light);
    assert_eq!(theme.scheme(), ColorScheme::Light);
    assert_eq!(theme.color(ColorToken::Primary).to_css(), "#00a86b");
}

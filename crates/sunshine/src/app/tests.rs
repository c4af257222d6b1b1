use super::*;

#[test]
fn test_cli_build() {
    let app = build_cli();
    assert_eq!(app.get_name(), "sunshine");
}

#[test]
fn test_cli_requires_subcommand() {
    let app = build_cli();
    assert!(app.try_get_matches_from(vec!["sunshine"]).is_err());
}

#[test]
fn test_cli_sync_json_flag() {
    let app = build_cli();
    let matches = app
        .try_get_matches_from(vec!["sunshine", "sync", "--json"])
        .unwrap();
    let sync_matches = matches.subcommand_matches("sync").unwrap();
    assert!(sync_matches.get_flag("json"));
}

#[test]
fn test_cli_verbose_is_global() {
    let app = build_cli();
    let matches = app
        .try_get_matches_from(vec!["sunshine", "sync", "-v"])
        .unwrap();
    assert!(matches.get_flag("verbose"));
}

#[test]
fn test_cli_watch_once_if_needed() {
    let app = build_cli();
    let matches = app
        .try_get_matches_from(vec!["sunshine", "watch", "--once-if-needed"])
        .unwrap();
    let watch_matches = matches.subcommand_matches("watch").unwrap();
    assert!(watch_matches.get_flag("once-if-needed"));
}

#[test]
fn test_cli_show_limit_default() {
    let app = build_cli();
    let matches = app.try_get_matches_from(vec!["sunshine", "show"]).unwrap();
    let show_matches = matches.subcommand_matches("show").unwrap();
    assert_eq!(*show_matches.get_one::<usize>("limit").unwrap(), 8);
    assert!(!show_matches.get_flag("refresh"));
    assert!(!show_matches.get_flag("daily"));
}

#[test]
fn test_cli_show_daily() {
    let app = build_cli();
    let matches = app
        .try_get_matches_from(vec!["sunshine", "show", "--daily", "--json"])
        .unwrap();
    let show_matches = matches.subcommand_matches("show").unwrap();
    assert!(show_matches.get_flag("daily"));
    assert!(show_matches.get_flag("json"));
}

#[test]
fn test_cli_prefs_units_values() {
    let app = build_cli();
    let matches = app
        .try_get_matches_from(vec!["sunshine", "prefs", "--units", "imperial"])
        .unwrap();
    let prefs_matches = matches.subcommand_matches("prefs").unwrap();
    assert_eq!(
        prefs_matches.get_one::<String>("units").unwrap(),
        "imperial"
    );
}

#[test]
fn test_cli_prefs_rejects_unknown_units() {
    let app = build_cli();
    let result = app.try_get_matches_from(vec!["sunshine", "prefs", "--units", "kelvin"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_prefs_notifications_toggle() {
    let app = build_cli();
    let result = app.try_get_matches_from(vec!["sunshine", "prefs", "--notifications", "maybe"]);
    assert!(result.is_err());

    let app = build_cli();
    let matches = app
        .try_get_matches_from(vec!["sunshine", "prefs", "--notifications", "off"])
        .unwrap();
    let prefs_matches = matches.subcommand_matches("prefs").unwrap();
    assert_eq!(
        prefs_matches.get_one::<String>("notifications").unwrap(),
        "off"
    );
}

#[test]
fn test_cli_notify_check_at() {
    let app = build_cli();
    let matches = app
        .try_get_matches_from(vec![
            "sunshine",
            "notify-check",
            "--at",
            "2024-05-01T14:00:00+03:00",
        ])
        .unwrap();
    let check_matches = matches.subcommand_matches("notify-check").unwrap();
    assert_eq!(
        check_matches.get_one::<String>("at").unwrap(),
        "2024-05-01T14:00:00+03:00"
    );
}

#[test]
fn test_cli_breadcrumbs_clear() {
    let app = build_cli();
    let matches = app
        .try_get_matches_from(vec!["sunshine", "breadcrumbs", "--clear"])
        .unwrap();
    let crumbs_matches = matches.subcommand_matches("breadcrumbs").unwrap();
    assert!(crumbs_matches.get_flag("clear"));
}

use super::*;

fn parse(text: &str) -> Result<SessionConfig, ConfigError> {
    SessionConfig::from_toml_str(text, Path::new("test.toml"))
}

#[test]
fn empty_file_gives_defaults() {
    let config = parse("").unwrap();
    assert_eq!(config, SessionConfig::default());
    assert_eq!(config.ai.difficulty, Difficulty::Medium);
    assert_eq!(config.ai.think_delay(), Duration::from_millis(1500));
    assert_eq!(config.clock, TimeControl::new(10, 5));
    assert_eq!(config.matches.num_games, 10);
    assert_eq!(config.matches.max_moves, 200);
    assert!(config.matches.alternate_colors);
}

#[test]
fn full_file() {
    let config = parse(
        r#"
        [ai]
        difficulty = "hard"
        think_delay_ms = 0
        seed = 42

        [clock]
        initial_time = 180
        increment = 2

        [match]
        num_games = 4
        max_moves = 80
        alternate_colors = false
        "#,
    )
    .unwrap();

    assert_eq!(config.ai.difficulty, Difficulty::Hard);
    assert_eq!(config.ai.think_delay(), Duration::ZERO);
    assert_eq!(config.ai.seed, Some(42));
    assert_eq!(config.clock, TimeControl::new(3, 2));
    assert_eq!(config.matches.num_games, 4);
    assert_eq!(config.matches.max_moves, 80);
    assert!(!config.matches.alternate_colors);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = parse("[ai]\ndifficulty = \"easy\"\n").unwrap();
    assert_eq!(config.ai.difficulty, Difficulty::Easy);
    assert_eq!(config.ai.think_delay_ms, 1500);
    assert_eq!(config.ai.seed, None);
    assert_eq!(config.clock, TimeControl::default());
}

#[test]
fn bad_difficulty_is_rejected() {
    let err = parse("[ai]\ndifficulty = \"grandmaster\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("test.toml"));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let path = std::env::temp_dir().join("chessmate-config-does-not-exist.toml");
    assert_eq!(
        SessionConfig::load_or_default(&path).unwrap(),
        SessionConfig::default()
    );
    assert!(matches!(
        SessionConfig::load(&path),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn written_config_reads_back() {
    let mut config = SessionConfig::default();
    config.ai.seed = Some(7);
    config.clock = TimeControl::unlimited();

    let text = config.to_toml_string().unwrap();
    assert!(text.contains("[match]"));
    assert_eq!(parse(&text).unwrap(), config);
}

#[test]
fn seeded_ai_is_reproducible() {
    let ai = AiConfig {
        difficulty: Difficulty::Hard,
        think_delay_ms: 0,
        seed: Some(3),
    };
    let engine = ai.build_engine();
    assert_eq!(engine.difficulty(), Difficulty::Hard);
}

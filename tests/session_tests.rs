use tui_jigsaw::core::{derangement, LayoutMetrics, PuzzleEvent, PuzzleSession, SessionSettings, SimpleRng};
use tui_jigsaw::types::{
    spawn_duration_ms, Coordinate, GridConfiguration, PuzzleMode, Rect, SessionPhase, SourceImage,
    Vec2, SHUFFLE_SETTLE_MS, SWAP_RESOLVE_MS,
};

fn grid(rows: u8, columns: u8) -> GridConfiguration {
    GridConfiguration::new(
        rows,
        columns,
        Some(SourceImage::new(columns as u32 * 120, rows as u32 * 80)),
        PuzzleMode::DragAndDrop,
    )
}

fn ready(rows: u8, columns: u8, seed: u32) -> PuzzleSession {
    let mut session = PuzzleSession::new(SessionSettings {
        snap_threshold: 0.5,
        seed,
    });
    session.set_board_bounds(Rect::from_center_size(Vec2::new(40.0, 20.0), Vec2::new(80.0, 40.0)));
    assert!(session.start_puzzle(&grid(rows, columns)));
    session.tick(spawn_duration_ms(rows));
    session.tick(SHUFFLE_SETTLE_MS);
    session
}

#[test]
fn layout_centres_grid_on_board() {
    let board = Rect::from_center_size(Vec2::new(40.0, 20.0), Vec2::new(80.0, 40.0));
    let m = LayoutMetrics::compute(&SourceImage::new(900, 600), 3, 3, 1.05, 0.9, Some(board));

    let first = m.world_position(Coordinate::new(0, 0));
    let last = m.world_position(Coordinate::new(2, 2));
    let mid = (first + last) * 0.5;
    assert!((mid.x - 40.0).abs() < 1e-3);
    assert!((mid.y - 20.0).abs() < 1e-3);

    let rect = m.grid_world_rect();
    assert!(rect.width() <= 80.0 * 0.9 + 1e-3);
    assert!(rect.height() <= 40.0 * 0.9 + 1e-3);
}

#[test]
fn arrangement_is_a_derangement_for_every_grid_size() {
    for rows in 2..=6u8 {
        for columns in 2..=6u8 {
            let coords: Vec<_> = (0..rows as usize * columns as usize)
                .map(|i| Coordinate::from_index(i, columns))
                .collect();
            let shuffled = derangement(&coords, &mut SimpleRng::new(rows as u32 * 31 + columns as u32));
            assert!(coords.iter().zip(&shuffled).all(|(a, b)| a != b));
        }
    }
}

#[test]
fn swap_keeps_coordinates_a_bijection() {
    let mut session = ready(4, 5, 77);
    let a = session.tiles()[3].id();
    let b = session.tiles()[17].id();
    assert!(session.request_swap(a, b));
    session.tick(SWAP_RESOLVE_MS);

    let mut seen: Vec<_> = session.tiles().iter().map(|t| t.current_coordinate().index(5)).collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..20).collect::<Vec<_>>());
}

#[test]
fn check_win_matches_all_correct() {
    let mut session = ready(3, 3, 5);
    assert!(!session.check_win());
    assert_eq!(session.phase(), SessionPhase::Ready);
}

#[test]
fn same_seed_gives_same_shuffle() {
    let a = ready(3, 4, 99);
    let b = ready(3, 4, 99);
    let coords = |s: &PuzzleSession| s.tiles().iter().map(|t| t.current_coordinate()).collect::<Vec<_>>();
    assert_eq!(coords(&a), coords(&b));
}

#[test]
fn tiles_rest_on_their_cells_after_settle() {
    let session = ready(3, 3, 8);
    let metrics = *session.metrics().unwrap();
    for tile in session.tiles() {
        let expected = metrics.world_position(tile.current_coordinate());
        let actual = session.tile_world_position(tile.id()).unwrap();
        assert!(expected.distance(actual) < 1e-3);
        assert!(!tile.visual().is_animating());
    }
}

#[test]
fn restart_emits_a_fresh_setup() {
    let mut session = ready(2, 2, 3);
    session.take_events();
    let config = grid(3, 2);
    assert!(session.start_puzzle(&config));
    assert_eq!(
        session.take_events(),
        vec![PuzzleEvent::SetupStarted { episode: 2, tiles: 6 }]
    );
    assert_eq!(session.configuration(), Some(&config));
}

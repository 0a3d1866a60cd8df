use fifteen_solver::engine::{Board, MoveOrder};
use fifteen_solver::heuristics::Heuristic;
use fifteen_solver::solver::{solve, MemoryPolicy, Outcome, SearchConfig, SearchReport, Strategy, Verdict};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn solved(start: &Board, config: &SearchConfig) -> SearchReport {
    match solve(start, config) {
        Verdict::Searched(report) => report,
        Verdict::Unsolvable => panic!("scrambled board reported unsolvable"),
    }
}

fn assert_reaches_goal(start: &Board, report: &SearchReport) -> usize {
    let path = report
        .outcome
        .path()
        .unwrap_or_else(|| panic!("expected a solution, got {}", report.outcome));
    let states = start.replay(path).unwrap();
    assert_eq!(states.last(), Some(&Board::goal(start.rows(), start.cols())));
    path.len()
}

#[test]
fn test_bfs_and_astar_agree_on_optimal_length() {
    let mut rng = SmallRng::seed_from_u64(2024);
    for moves in [4, 8, 12, 14] {
        let (start, walk) = Board::scrambled(4, 4, moves, &mut rng);
        let bfs = solved(&start, &SearchConfig::new(Strategy::Bfs));
        let optimum = assert_reaches_goal(&start, &bfs);
        assert!(optimum <= walk.len());
        for heuristic in [Heuristic::Manhattan, Heuristic::LinearConflict] {
            let config = SearchConfig {
                heuristic,
                ..SearchConfig::new(Strategy::AStar)
            };
            assert_eq!(assert_reaches_goal(&start, &solved(&start, &config)), optimum);
        }
    }
}

#[test]
fn test_suboptimal_strategies_still_reach_goal() {
    let mut rng = SmallRng::seed_from_u64(77);
    let (start, _) = Board::scrambled(3, 3, 14, &mut rng);
    let optimum = assert_reaches_goal(&start, &solved(&start, &SearchConfig::new(Strategy::Bfs)));

    for strategy in [Strategy::Dfs, Strategy::BestFirst] {
        let config = SearchConfig {
            max_nodes: Some(2_000_000),
            ..SearchConfig::new(strategy)
        };
        assert!(assert_reaches_goal(&start, &solved(&start, &config)) >= optimum);
    }
}

#[test]
fn test_iddfs_with_random_order_is_optimal() {
    let (start, _) = Board::scrambled(3, 3, 10, &mut SmallRng::seed_from_u64(5));
    let optimum = assert_reaches_goal(&start, &solved(&start, &SearchConfig::new(Strategy::Bfs)));
    let config = SearchConfig {
        order: MoveOrder::Random,
        seed: Some(11),
        ..SearchConfig::new(Strategy::Iddfs)
    };
    assert_eq!(assert_reaches_goal(&start, &solved(&start, &config)), optimum);
}

#[test]
fn test_memory_bounded_policies() {
    let (start, _) = Board::scrambled(4, 4, 14, &mut SmallRng::seed_from_u64(31));
    let optimum = assert_reaches_goal(&start, &solved(&start, &SearchConfig::new(Strategy::AStar)));

    let backup = SearchConfig {
        memory_policy: MemoryPolicy::Backup,
        ..SearchConfig::new(Strategy::Sma)
    };
    assert_eq!(assert_reaches_goal(&start, &solved(&start, &backup)), optimum);

    // Ample room: the trimmed open list never loses the optimal branch.
    let drop_worst = SearchConfig::new(Strategy::Sma);
    assert_eq!(assert_reaches_goal(&start, &solved(&start, &drop_worst)), optimum);
}

#[test]
fn test_every_strategy_on_one_move_puzzle() {
    let start = Board::from_cells(4, 4, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 0, 15]).unwrap();
    for strategy in Strategy::ALL {
        let config = SearchConfig {
            order: "DRLU".parse().unwrap(),
            ..SearchConfig::new(strategy)
        };
        let report = solved(&start, &config);
        assert_eq!(report.outcome, Outcome::Solved("R".parse().unwrap()), "{strategy}");
    }
}

#[test]
fn test_transposed_tiles_are_unsolvable() {
    let start = Board::from_cells(3, 3, vec![2, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap();
    for strategy in Strategy::ALL {
        assert_eq!(solve(&start, &SearchConfig::new(strategy)), Verdict::Unsolvable);
    }
}

//! Scenario tests driving the registry and session APIs end to end,
//! the way the connection layer does.

use tictac_core::{
    ClientId, GameRegistry, JoinError, PlaceError, PlaceOutcome, ALLOWED_GRID_SIZES,
};

const ALICE: ClientId = ClientId(1);
const BOB: ClientId = ClientId(2);

#[tokio::test]
async fn create_join_play_to_a_column_win() {
    let registry = GameRegistry::new();

    let id = registry.create_game(5, ALICE).await.unwrap();
    assert_eq!(registry.list_joinable().await, vec![(id, 5)]);

    let session = registry.join(id, BOB).await.unwrap();
    assert!(registry.list_joinable().await.is_empty());

    // Alice (X) fills column 2, Bob (O) scatters through column 4.
    {
        let mut game = session.lock().await;
        for row in ['A', 'B', 'C', 'D'] {
            assert_eq!(game.place(row, 2, ALICE), Ok(PlaceOutcome::Continue));
            assert_eq!(game.place(row, 4, BOB), Ok(PlaceOutcome::Continue));
        }
        assert_eq!(game.place('E', 2, ALICE), Ok(PlaceOutcome::Win));
        assert!(game.is_finished());
    }

    // Finished games still resolve by id until both players leave.
    assert!(registry.get(id).await.is_some());

    {
        let mut game = session.lock().await;
        let first = game.quit(ALICE);
        assert_eq!(first.opponent, Some(BOB));
        assert!(!first.forfeit);
        let second = game.quit(BOB);
        assert_eq!(second.opponent, None);
        assert!(game.is_empty());
    }
    registry.remove(id).await;
    assert!(registry.get(id).await.is_none());
}

#[tokio::test]
async fn forfeit_frees_the_id_once_the_winner_leaves() {
    let registry = GameRegistry::new();
    let id = registry.create_game(3, ALICE).await.unwrap();
    let session = registry.join(id, BOB).await.unwrap();

    {
        let mut game = session.lock().await;
        game.place('A', 1, ALICE).unwrap();
        let outcome = game.quit(BOB);
        assert_eq!(outcome.opponent, Some(ALICE));
        assert!(outcome.forfeit);

        // The abandoned game accepts no further placements or joins.
        assert_eq!(game.place('B', 1, ALICE), Err(PlaceError::GameAlreadyFinished));
        assert_eq!(game.join(ClientId(3)), Err(JoinError::NotJoinable));

        game.quit(ALICE);
        assert!(game.is_empty());
    }
    registry.remove(id).await;
    assert!(registry.get(id).await.is_none());
}

#[tokio::test]
async fn every_allowed_grid_size_is_playable() {
    let registry = GameRegistry::new();
    for size in ALLOWED_GRID_SIZES {
        let id = registry.create_game(size, ALICE).await.unwrap();
        let session = registry.join(id, BOB).await.unwrap();
        let mut game = session.lock().await;
        assert_eq!(game.grid_size(), size);
        assert_eq!(game.place('A', 1, ALICE), Ok(PlaceOutcome::Continue));
        // The last row and column exist; one past them does not.
        let last_row = (b'A' + size as u8 - 1) as char;
        assert_eq!(game.place(last_row, size as u32, BOB), Ok(PlaceOutcome::Continue));
        let past_row = (b'A' + size as u8) as char;
        assert_eq!(game.place(past_row, 1, ALICE), Err(PlaceError::OutOfBounds));
        assert_eq!(
            game.place('A', size as u32 + 1, ALICE),
            Err(PlaceError::OutOfBounds)
        );
    }
}

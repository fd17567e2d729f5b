//! Lane reorder engine.
//!
//! Given the full ordered snapshot of clients, a target client, and an
//! optional new lane and/or rank, [`reorder`] computes the complete new
//! (lane, rank) assignment for every client whose rank must shift.
//!
//! After every call, each lane's ranks form the contiguous sequence
//! `1..=N` (N = lane size), and the relative order of clients not
//! touched by the move is preserved. The shift is a single linear pass
//! over the affected lane, not a re-sort: it moves exactly the closed
//! interval of ranks between the old and new position by one unit,
//! opening a hole at the destination and closing the hole at the source.

use super::client::{Client, ClientId, Lane, Rank};

/// Recomputes lane/rank assignments for a move request.
///
/// `snapshot` must contain every client, pre-sorted by (lane, rank)
/// ascending; that total order is the tie-break for clients whose ranks
/// are equal. `new_lane` and `new_rank` are independently optional:
///
/// - lane only: the target is appended to the destination lane at
///   `max(destination ranks) + 1`, and the vacated lane is renumbered
///   to stay contiguous;
/// - rank only: the target moves within its lane, the requested rank
///   clamped into `[1, lane size]`;
/// - lane and rank: the append happens first, then the rank move
///   operates on the destination lane;
/// - neither: the snapshot is returned unchanged.
///
/// Callers validate the target id first; an id absent from the
/// snapshot leaves it untouched.
///
/// The returned snapshot is re-sorted by (lane, rank) and contains
/// every client, including the ones that did not move.
#[must_use]
pub fn reorder(
    mut snapshot: Vec<Client>,
    target_id: ClientId,
    new_lane: Option<Lane>,
    new_rank: Option<Rank>,
) -> Vec<Client> {
    let Some(target_index) = snapshot.iter().position(|client| client.id == target_id) else {
        return snapshot;
    };

    if let Some(destination) = new_lane {
        if destination != snapshot[target_index].lane {
            move_to_lane(&mut snapshot, target_index, destination);
        }
    }

    if let Some(requested) = new_rank {
        place_at_rank(&mut snapshot, target_index, requested);
    }

    // Stable: clients with equal (lane, rank) keep their snapshot order.
    snapshot.sort_by_key(|client| (client.lane, client.rank));
    snapshot
}

/// Appends the target to `destination` and closes the hole it leaves
/// behind in its current lane.
fn move_to_lane(snapshot: &mut [Client], target_index: usize, destination: Lane) {
    let source = snapshot[target_index].lane;
    let vacated = snapshot[target_index].rank;

    let next_rank = snapshot
        .iter()
        .filter(|client| client.lane == destination)
        .map(|client| client.rank.get())
        .max()
        .unwrap_or(0)
        + 1;

    snapshot[target_index].lane = destination;
    snapshot[target_index].rank = Rank::new(next_rank);

    for client in snapshot
        .iter_mut()
        .filter(|client| client.lane == source && client.rank > vacated)
    {
        client.rank = Rank::new(client.rank.get() - 1);
    }
}

/// Moves the target to the requested rank within its current lane,
/// clamping the request into `[1, lane size]` and shifting the interval
/// of ranks between the old and new position by one.
#[allow(clippy::cast_possible_wrap)]
fn place_at_rank(snapshot: &mut [Client], target_index: usize, requested: Rank) {
    let lane = snapshot[target_index].lane;
    let lane_size = snapshot
        .iter()
        .filter(|client| client.lane == lane)
        .count() as i64;

    // The target itself is a lane member, so lane_size >= 1.
    let new_rank = requested.get().clamp(1, lane_size);
    let old_rank = snapshot[target_index].rank.get();

    if new_rank == old_rank {
        return;
    }

    if new_rank > old_rank {
        // Toward lower priority: ranks in (old, new] each move up a slot.
        for client in snapshot.iter_mut().filter(|client| client.lane == lane) {
            let rank = client.rank.get();
            if rank > old_rank && rank <= new_rank {
                client.rank = Rank::new(rank - 1);
            }
        }
    } else {
        // Toward higher priority: ranks in [new, old) each move down a slot.
        for client in snapshot.iter_mut().filter(|client| client.lane == lane) {
            let rank = client.rank.get();
            if rank >= new_rank && rank < old_rank {
                client.rank = Rank::new(rank + 1);
            }
        }
    }

    snapshot[target_index].rank = Rank::new(new_rank);
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn client(id: i64, lane: Lane, rank: i64) -> Client {
        Client::new(
            ClientId::new(id),
            format!("client-{id}"),
            "",
            lane,
            Rank::new(rank),
        )
    }

    /// Builds a snapshot already sorted by (lane, rank).
    fn board(clients: Vec<Client>) -> Vec<Client> {
        let mut clients = clients;
        clients.sort_by_key(|c| (c.lane, c.rank));
        clients
    }

    fn rank_of(snapshot: &[Client], id: i64) -> i64 {
        snapshot
            .iter()
            .find(|c| c.id == ClientId::new(id))
            .expect("client present")
            .rank
            .get()
    }

    fn lane_of(snapshot: &[Client], id: i64) -> Lane {
        snapshot
            .iter()
            .find(|c| c.id == ClientId::new(id))
            .expect("client present")
            .lane
    }

    /// Asserts each lane holds exactly the ranks 1..=N.
    fn assert_contiguous(snapshot: &[Client]) {
        for lane in [Lane::Backlog, Lane::InProgress, Lane::Complete] {
            let mut ranks: Vec<i64> = snapshot
                .iter()
                .filter(|c| c.lane == lane)
                .map(|c| c.rank.get())
                .collect();
            ranks.sort_unstable();
            let expected: Vec<i64> = (1..=ranks.len() as i64).collect();
            assert_eq!(ranks, expected, "lane {lane} is not contiguous");
        }
    }

    // -------------------------------------------------------------------------
    // Moves within a lane
    // -------------------------------------------------------------------------

    #[rstest]
    fn test_move_to_front_shifts_others_down() {
        // A(1), B(2), C(3); move C to rank 1.
        let snapshot = board(vec![
            client(1, Lane::Backlog, 1),
            client(2, Lane::Backlog, 2),
            client(3, Lane::Backlog, 3),
        ]);

        let result = reorder(snapshot, ClientId::new(3), None, Some(Rank::new(1)));

        assert_eq!(rank_of(&result, 3), 1);
        assert_eq!(rank_of(&result, 1), 2);
        assert_eq!(rank_of(&result, 2), 3);
        assert_contiguous(&result);
    }

    #[rstest]
    fn test_move_to_back_shifts_others_up() {
        let snapshot = board(vec![
            client(1, Lane::Backlog, 1),
            client(2, Lane::Backlog, 2),
            client(3, Lane::Backlog, 3),
        ]);

        let result = reorder(snapshot, ClientId::new(1), None, Some(Rank::new(3)));

        assert_eq!(rank_of(&result, 1), 3);
        assert_eq!(rank_of(&result, 2), 1);
        assert_eq!(rank_of(&result, 3), 2);
        assert_contiguous(&result);
    }

    #[rstest]
    fn test_move_to_middle_only_shifts_interval() {
        // Five members; moving 5 -> 2 must leave rank 1 alone.
        let snapshot = board(vec![
            client(1, Lane::Backlog, 1),
            client(2, Lane::Backlog, 2),
            client(3, Lane::Backlog, 3),
            client(4, Lane::Backlog, 4),
            client(5, Lane::Backlog, 5),
        ]);

        let result = reorder(snapshot, ClientId::new(5), None, Some(Rank::new(2)));

        assert_eq!(rank_of(&result, 1), 1);
        assert_eq!(rank_of(&result, 5), 2);
        assert_eq!(rank_of(&result, 2), 3);
        assert_eq!(rank_of(&result, 3), 4);
        assert_eq!(rank_of(&result, 4), 5);
        assert_contiguous(&result);
    }

    #[rstest]
    fn test_move_to_own_rank_is_noop() {
        let snapshot = board(vec![
            client(1, Lane::Backlog, 1),
            client(2, Lane::Backlog, 2),
            client(3, Lane::Backlog, 3),
        ]);

        let result = reorder(
            snapshot.clone(),
            ClientId::new(2),
            Some(Lane::Backlog),
            Some(Rank::new(2)),
        );

        assert_eq!(result, snapshot);
    }

    // -------------------------------------------------------------------------
    // Clamping
    // -------------------------------------------------------------------------

    #[rstest]
    #[case(0)]
    #[case(-5)]
    fn test_rank_below_one_clamps_to_one(#[case] requested: i64) {
        let snapshot = board(vec![
            client(1, Lane::Backlog, 1),
            client(2, Lane::Backlog, 2),
            client(3, Lane::Backlog, 3),
        ]);

        let result = reorder(snapshot, ClientId::new(3), None, Some(Rank::new(requested)));

        assert_eq!(rank_of(&result, 3), 1);
        assert_contiguous(&result);
    }

    #[rstest]
    #[case(4)]
    #[case(99)]
    fn test_rank_above_lane_size_clamps_to_lane_size(#[case] requested: i64) {
        let snapshot = board(vec![
            client(1, Lane::Backlog, 1),
            client(2, Lane::Backlog, 2),
            client(3, Lane::Backlog, 3),
        ]);

        let result = reorder(snapshot, ClientId::new(1), None, Some(Rank::new(requested)));

        assert_eq!(rank_of(&result, 1), 3);
        assert_contiguous(&result);
    }

    // -------------------------------------------------------------------------
    // Lane changes
    // -------------------------------------------------------------------------

    #[rstest]
    fn test_lane_move_appends_and_renumbers_source() {
        // backlog: A(1), B(2), C(3); in-progress: D(1).
        // Moving A to in-progress appends it at rank 2 and compacts backlog.
        let snapshot = board(vec![
            client(1, Lane::Backlog, 1),
            client(2, Lane::Backlog, 2),
            client(3, Lane::Backlog, 3),
            client(4, Lane::InProgress, 1),
        ]);

        let result = reorder(snapshot, ClientId::new(1), Some(Lane::InProgress), None);

        assert_eq!(lane_of(&result, 1), Lane::InProgress);
        assert_eq!(rank_of(&result, 1), 2);
        assert_eq!(rank_of(&result, 2), 1);
        assert_eq!(rank_of(&result, 3), 2);
        assert_eq!(rank_of(&result, 4), 1);
        assert_contiguous(&result);
    }

    #[rstest]
    fn test_lane_move_to_empty_lane_gets_rank_one() {
        let snapshot = board(vec![
            client(1, Lane::Backlog, 1),
            client(2, Lane::Backlog, 2),
        ]);

        let result = reorder(snapshot, ClientId::new(2), Some(Lane::Complete), None);

        assert_eq!(lane_of(&result, 2), Lane::Complete);
        assert_eq!(rank_of(&result, 2), 1);
        assert_eq!(rank_of(&result, 1), 1);
        assert_contiguous(&result);
    }

    #[rstest]
    fn test_lane_move_with_rank_places_within_destination() {
        // Move into a populated lane and straight to its front.
        let snapshot = board(vec![
            client(1, Lane::Backlog, 1),
            client(2, Lane::InProgress, 1),
            client(3, Lane::InProgress, 2),
        ]);

        let result = reorder(
            snapshot,
            ClientId::new(1),
            Some(Lane::InProgress),
            Some(Rank::new(1)),
        );

        assert_eq!(lane_of(&result, 1), Lane::InProgress);
        assert_eq!(rank_of(&result, 1), 1);
        assert_eq!(rank_of(&result, 2), 2);
        assert_eq!(rank_of(&result, 3), 3);
        assert_contiguous(&result);
    }

    #[rstest]
    fn test_lane_move_does_not_touch_third_lane() {
        let snapshot = board(vec![
            client(1, Lane::Backlog, 1),
            client(2, Lane::InProgress, 1),
            client(3, Lane::Complete, 1),
            client(4, Lane::Complete, 2),
        ]);

        let result = reorder(snapshot, ClientId::new(1), Some(Lane::InProgress), None);

        assert_eq!(rank_of(&result, 3), 1);
        assert_eq!(rank_of(&result, 4), 2);
        assert_contiguous(&result);
    }

    // -------------------------------------------------------------------------
    // Degenerate inputs
    // -------------------------------------------------------------------------

    #[rstest]
    fn test_no_lane_no_rank_returns_snapshot_unchanged() {
        let snapshot = board(vec![
            client(1, Lane::Backlog, 1),
            client(2, Lane::Backlog, 2),
        ]);

        let result = reorder(snapshot.clone(), ClientId::new(1), None, None);

        assert_eq!(result, snapshot);
    }

    #[rstest]
    fn test_unknown_target_returns_snapshot_unchanged() {
        let snapshot = board(vec![client(1, Lane::Backlog, 1)]);

        let result = reorder(
            snapshot.clone(),
            ClientId::new(99),
            Some(Lane::Complete),
            Some(Rank::new(1)),
        );

        assert_eq!(result, snapshot);
    }

    #[rstest]
    fn test_single_member_lane_rank_move_is_noop() {
        let snapshot = board(vec![client(1, Lane::Backlog, 1)]);

        let result = reorder(snapshot.clone(), ClientId::new(1), None, Some(Rank::new(7)));

        assert_eq!(result, snapshot);
    }

    #[rstest]
    fn test_same_lane_given_explicitly_behaves_like_rank_only_move() {
        let snapshot = board(vec![
            client(1, Lane::Backlog, 1),
            client(2, Lane::Backlog, 2),
        ]);

        let with_lane = reorder(
            snapshot.clone(),
            ClientId::new(2),
            Some(Lane::Backlog),
            Some(Rank::new(1)),
        );
        let without_lane = reorder(snapshot, ClientId::new(2), None, Some(Rank::new(1)));

        assert_eq!(with_lane, without_lane);
    }

    // -------------------------------------------------------------------------
    // Output ordering
    // -------------------------------------------------------------------------

    #[rstest]
    fn test_output_is_sorted_by_lane_then_rank() {
        let snapshot = board(vec![
            client(1, Lane::Complete, 1),
            client(2, Lane::Backlog, 1),
            client(3, Lane::Backlog, 2),
            client(4, Lane::InProgress, 1),
        ]);

        let result = reorder(snapshot, ClientId::new(3), None, Some(Rank::new(1)));

        let order: Vec<(Lane, i64)> = result.iter().map(|c| (c.lane, c.rank.get())).collect();
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(order, sorted);
    }
}

//! Round setup for the imposter word game
//!
//! Validates a request, then draws the secret word, the play order, the
//! imposter and the starting player from a caller-supplied random source.

use crate::error::SetupError;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use shared::{PlayerAssignment, SetupResponse, MIN_PLAYERS};

/// Anything that can hand out the word list of a named category
///
/// Implementations report every failure as an empty list.
pub trait WordSource {
    fn words(&self, category: &str) -> Vec<String>;
}

/// One randomized round: who plays which role, and who speaks first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameAssignment {
    pub target_word: String,
    pub imposter: String,
    pub starter: String,
    pub queue: Vec<PlayerAssignment>,
}

impl From<GameAssignment> for SetupResponse {
    fn from(game: GameAssignment) -> Self {
        SetupResponse {
            queue: game.queue,
            starter: game.starter,
        }
    }
}

/// Validates a setup request and deals one round
///
/// All validation happens before `rng` is touched, so a rejected request
/// leaves the random stream where it was. The caller's player list is cloned
/// before shuffling.
pub fn setup_game<S, R>(
    source: &S,
    players: &[String],
    category: &str,
    rng: &mut R,
) -> Result<GameAssignment, SetupError>
where
    S: WordSource + ?Sized,
    R: Rng + ?Sized,
{
    if players.len() < MIN_PLAYERS {
        return Err(SetupError::NotEnoughPlayers);
    }

    if category.is_empty() {
        return Err(SetupError::NoCategory);
    }

    let words = source.words(category);
    let target_word = words
        .choose(rng)
        .cloned()
        .ok_or(SetupError::EmptyCategory)?;

    let mut shuffled = players.to_vec();
    shuffled.shuffle(rng);

    let imposter = shuffled
        .choose(rng)
        .cloned()
        .ok_or(SetupError::NotEnoughPlayers)?;
    let starter = shuffled
        .choose(rng)
        .cloned()
        .ok_or(SetupError::NotEnoughPlayers)?;

    // Matching by name: repeated names all share the imposter's role.
    let queue = shuffled
        .into_iter()
        .map(|player| {
            if player == imposter {
                PlayerAssignment::imposter(player)
            } else {
                PlayerAssignment::civilian(player, &target_word)
            }
        })
        .collect();

    info!(
        "Dealt a round of '{}' for {} players",
        category,
        players.len()
    );
    debug!("Imposter: {}, starter: {}", imposter, starter);

    Ok(GameAssignment {
        target_word,
        imposter,
        starter,
        queue,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shared::{Role, IMPOSTER_SECRET};
    use std::collections::HashMap;

    struct MemorySource(HashMap<String, Vec<String>>);

    impl WordSource for MemorySource {
        fn words(&self, category: &str) -> Vec<String> {
            self.0.get(category).cloned().unwrap_or_default()
        }
    }

    fn test_source() -> MemorySource {
        let mut categories = HashMap::new();
        categories.insert(
            "Animals".to_string(),
            vec!["Cat".to_string(), "Dog".to_string(), "Owl".to_string()],
        );
        categories.insert("Empty".to_string(), Vec::new());
        MemorySource(categories)
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn sorted(mut list: Vec<String>) -> Vec<String> {
        list.sort();
        list
    }

    #[test]
    fn test_setup_too_few_players() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = setup_game(&test_source(), &names(&["A", "B"]), "Animals", &mut rng);
        assert_eq!(result, Err(SetupError::NotEnoughPlayers));

        let result = setup_game(&test_source(), &[], "Animals", &mut rng);
        assert_eq!(result, Err(SetupError::NotEnoughPlayers));
    }

    #[test]
    fn test_setup_player_check_comes_first() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = setup_game(&test_source(), &names(&["A"]), "", &mut rng);
        assert_eq!(result, Err(SetupError::NotEnoughPlayers));
    }

    #[test]
    fn test_setup_no_category() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = setup_game(&test_source(), &names(&["A", "B", "C"]), "", &mut rng);
        assert_eq!(result, Err(SetupError::NoCategory));
    }

    #[test]
    fn test_setup_empty_or_missing_category() {
        let mut rng = StdRng::seed_from_u64(1);
        let players = names(&["A", "B", "C"]);

        let result = setup_game(&test_source(), &players, "Empty", &mut rng);
        assert_eq!(result, Err(SetupError::EmptyCategory));

        let result = setup_game(&test_source(), &players, "Plants", &mut rng);
        assert_eq!(result, Err(SetupError::EmptyCategory));
    }

    #[test]
    fn test_rejected_setup_does_not_consume_randomness() {
        let mut used = StdRng::seed_from_u64(9);
        let mut fresh = StdRng::seed_from_u64(9);
        let players = names(&["A", "B", "C", "D"]);

        let _ = setup_game(&test_source(), &players, "Empty", &mut used);

        let a = setup_game(&test_source(), &players, "Animals", &mut used).unwrap();
        let b = setup_game(&test_source(), &players, "Animals", &mut fresh).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_setup_assigns_roles() {
        let mut rng = StdRng::seed_from_u64(42);
        let players = names(&["Ana", "Ben", "Cy", "Dee", "Eli"]);

        let game = setup_game(&test_source(), &players, "Animals", &mut rng).unwrap();

        assert!(["Cat", "Dog", "Owl"].contains(&game.target_word.as_str()));
        assert_eq!(game.queue.len(), players.len());

        let imposters: Vec<_> = game.queue.iter().filter(|a| a.is_imposter()).collect();
        assert_eq!(imposters.len(), 1);
        assert_eq!(imposters[0].player, game.imposter);
        assert_eq!(imposters[0].secret_word, IMPOSTER_SECRET);

        for assignment in game.queue.iter().filter(|a| !a.is_imposter()) {
            assert_eq!(assignment.role, Role::Civilian);
            assert_eq!(assignment.secret_word, game.target_word);
        }

        assert!(players.contains(&game.starter));
    }

    #[test]
    fn test_setup_queue_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let players = names(&["Ana", "Ben", "Cy", "Dee", "Eli", "Fay"]);
        let original = players.clone();

        let game = setup_game(&test_source(), &players, "Animals", &mut rng).unwrap();
        let queued: Vec<String> = game.queue.iter().map(|a| a.player.clone()).collect();

        assert_eq!(sorted(queued), sorted(players.clone()));
        assert_eq!(players, original);
    }

    #[test]
    fn test_setup_duplicate_names_share_imposter_role() {
        let players = names(&["Sam", "Sam", "Sam", "Sam"]);
        let mut rng = StdRng::seed_from_u64(3);

        let game = setup_game(&test_source(), &players, "Animals", &mut rng).unwrap();

        assert!(game.queue.iter().all(|a| a.is_imposter()));
        assert_eq!(game.starter, "Sam");
    }

    #[test]
    fn test_setup_duplicate_names_mixed() {
        let players = names(&["Sam", "Sam", "Kim"]);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let game = setup_game(&test_source(), &players, "Animals", &mut rng).unwrap();

            let imposters = game.queue.iter().filter(|a| a.is_imposter()).count();
            let expected = players.iter().filter(|p| **p == game.imposter).count();
            assert_eq!(imposters, expected);
        }
    }

    #[test]
    fn test_setup_same_seed_same_round() {
        let players = names(&["Ana", "Ben", "Cy", "Dee"]);

        let a = setup_game(&test_source(), &players, "Animals", &mut StdRng::seed_from_u64(11));
        let b = setup_game(&test_source(), &players, "Animals", &mut StdRng::seed_from_u64(11));

        assert_eq!(a, b);
    }

    #[test]
    fn test_setup_response_from_assignment() {
        let mut rng = StdRng::seed_from_u64(5);
        let game = setup_game(&test_source(), &names(&["A", "B", "C"]), "Animals", &mut rng)
            .unwrap();
        let starter = game.starter.clone();
        let queue = game.queue.clone();

        let response = SetupResponse::from(game);
        assert_eq!(response.starter, starter);
        assert_eq!(response.queue, queue);
        assert_eq!(response.imposters().count(), 1);
    }
}

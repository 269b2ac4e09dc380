//! Lookup Seeding
//!
//! Runs on every start. Values are matched by their natural key, so running
//! it again neither duplicates rows nor renumbers them.

use std::sync::Arc;

use kernel::id::markers;

use crate::domain::entity::lookup::{Color, Priority, State};
use crate::domain::repository::LookupRepository;
use crate::error::TodoResult;

/// The reference values every installation starts with
#[derive(Debug, Clone)]
pub struct LookupDefaults {
    pub states: Vec<String>,
    pub priorities: Vec<String>,
    pub colors: Vec<String>,
}

impl Default for LookupDefaults {
    fn default() -> Self {
        Self {
            states: ["done", "todo", "in progress", "paused"]
                .map(String::from)
                .to_vec(),
            priorities: ["very low", "low", "medium", "high", "very high", "max"]
                .map(String::from)
                .to_vec(),
            colors: ["#000000", "#ff0000", "#0000ff", "#00ff00", "#ffffff"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Seeded rows with the ids the store assigned (or already had)
#[derive(Debug, Clone)]
pub struct SeededLookups {
    pub states: Vec<State>,
    pub priorities: Vec<Priority>,
    pub colors: Vec<Color>,
}

pub struct SeedLookupsUseCase<L>
where
    L: LookupRepository,
{
    repo: Arc<L>,
}

impl<L> SeedLookupsUseCase<L>
where
    L: LookupRepository,
{
    pub fn new(repo: Arc<L>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, defaults: &LookupDefaults) -> TodoResult<SeededLookups> {
        let states = self
            .repo
            .ensure_present::<markers::State>(&as_strs(&defaults.states))
            .await?;
        let priorities = self
            .repo
            .ensure_present::<markers::Priority>(&as_strs(&defaults.priorities))
            .await?;
        let colors = self
            .repo
            .ensure_present::<markers::Color>(&as_strs(&defaults.colors))
            .await?;

        tracing::info!(
            states = states.len(),
            priorities = priorities.len(),
            colors = colors.len(),
            "Lookup tables seeded"
        );

        Ok(SeededLookups {
            states,
            priorities,
            colors,
        })
    }
}

fn as_strs(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestContext;

    #[tokio::test]
    async fn test_seed_twice_keeps_ids_and_counts() {
        let ctx = TestContext::new().await;
        let seed = SeedLookupsUseCase::new(ctx.repo.clone());
        let defaults = LookupDefaults::default();

        let first = seed.execute(&defaults).await.unwrap();
        let second = seed.execute(&defaults).await.unwrap();

        assert_eq!(first.states, second.states);
        assert_eq!(first.priorities, second.priorities);
        assert_eq!(first.colors, second.colors);

        assert_eq!(ctx.repo.list::<markers::State>().await.unwrap().len(), 4);
        assert_eq!(ctx.repo.list::<markers::Priority>().await.unwrap().len(), 6);
        assert_eq!(ctx.repo.list::<markers::Color>().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_seed_adopts_rows_already_present() {
        let ctx = TestContext::new().await;
        let existing = ctx
            .repo
            .ensure_present::<markers::State>(&["paused"])
            .await
            .unwrap();

        let seeded = SeedLookupsUseCase::new(ctx.repo.clone())
            .execute(&LookupDefaults::default())
            .await
            .unwrap();

        let paused = seeded
            .states
            .iter()
            .find(|s| s.value == "paused")
            .unwrap();
        assert_eq!(paused.id, existing[0].id);
        assert_eq!(ctx.repo.list::<markers::State>().await.unwrap().len(), 4);
    }
}

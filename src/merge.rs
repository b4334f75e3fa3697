use crate::types::{MergedEntry, Overrides, Repository, NO_DESCRIPTION};

/// Combines the upstream listing with the stored overrides.
///
/// Output order is the input order. Overrides win even when their text is
/// empty; otherwise the native description is used, then [`NO_DESCRIPTION`].
/// Overrides whose repository is not in `repos` are ignored.
pub fn merge(repos: Vec<Repository>, overrides: &Overrides) -> Vec<MergedEntry> {
    repos
        .into_iter()
        .map(|repo| {
            let found = overrides.get(&repo.key());
            let description = match found {
                Some(record) => record.text.clone(),
                None => repo
                    .description
                    .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            };

            MergedEntry {
                id: repo.id,
                name: repo.name,
                full_name: repo.full_name,
                description,
                is_custom_description: found.is_some(),
                html_url: repo.html_url,
                language: repo.language,
                stargazers_count: repo.stargazers_count,
                forks_count: repo.forks_count,
                updated_at: repo.updated_at,
                topics: repo.topics,
                description_updated_at: found.map(|record| record.updated_at),
            }
        })
        .collect()
}

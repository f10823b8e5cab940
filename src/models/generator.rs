//! Random record generation for the bulk creation endpoint.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::NewRecord;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Dennis", "Donald", "Edsger", "Frances", "Grace", "Guido",
    "John", "Ken", "Leslie", "Linus", "Margaret", "Niklaus", "Radia", "Shafi", "Sophie", "Tim",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Backus", "Dijkstra", "Hamilton", "Hopper", "Kernighan", "Knuth", "Lamport",
    "Liskov", "Lovelace", "McCarthy", "Perlman", "Ritchie", "Shannon", "Thompson", "Torvalds",
    "Turing", "Wilson", "Wirth", "Goldwasser",
];

const DOMAINS: &[&str] = &["example.com", "example.org", "mail.test", "directory.dev"];

/// Generates `count` records with plausible names, ages in 18..=80 and
/// emails that are unique within the returned set.
pub fn generate_records(count: usize) -> Vec<NewRecord> {
    let mut rng = rand::thread_rng();
    // Shared by every email of this run so separate runs do not collide either.
    let run_tag: u32 = rng.gen();

    (0..count)
        .map(|i| {
            let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Alex");
            let last = LAST_NAMES.choose(&mut rng).copied().unwrap_or("Doe");
            let domain = DOMAINS.choose(&mut rng).copied().unwrap_or("example.com");
            NewRecord {
                name: format!("{} {}", first, last),
                age: rng.gen_range(18..=80),
                email: format!(
                    "{}.{}.{:08x}{}@{}",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    run_tag,
                    i,
                    domain
                ),
            }
        })
        .collect()
}

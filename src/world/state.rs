use crate::world::types::{CategoryId, LocationId, WorldDocument};

/// Category whose member locations are private player rooms.
pub const PRIVATE_QUARTERS_CATEGORY: &str = "Private quarters";

/// Shared virtual category that private rooms resolve to for travel lookups.
pub const PRIVATE_QUARTERS_HUB: &str = "Hotel Eclipse";

/// Reserved destination token that redirects to the caller's own room.
pub const BEDROOM_TOKEN: &str = "bedroom";

/// Categories where each location keys its own adjacency row instead of the
/// category doing so.
pub const SELF_ADJACENT_CATEGORIES: &[&str] = &["Mediterranean Sea", "Outdoors"];

/// Returns true when `category` follows the self-adjacent lookup rule.
pub fn is_self_adjacent(category: &CategoryId) -> bool {
    SELF_ADJACENT_CATEGORIES.contains(&category.as_str())
}

/// Hotel Eclipse starter locations seeded on first open.
///
/// Only the `Hotel Eclipse` hub row and the `bedroom` token are load-bearing
/// (private-quarters movement resolves through them). The remaining rows are
/// set dressing that operators are free to replace with their own layouts.
pub const STARTER_WORLD_LOCATION_IDS: &[&str] = &[
    "lobby",
    "bar",
    "restaurant",
    "roof-terrace",
    "hotel-entrance",
    "promenade",
    "beach",
    "marina",
    "open-water",
    "hidden-cove",
];

/// Build the canonical starter world that ships as a reference layout.
///
/// The hub row intentionally lists `bedroom`: guests anywhere in the hotel can
/// walk "to bedroom" and the movement transaction redirects to their own room.
pub fn canonical_world_document() -> WorldDocument {
    let mut doc = WorldDocument::empty();

    let rows: &[(&str, &[&str])] = &[
        // The hotel interior, including the reserved bedroom token.
        (
            PRIVATE_QUARTERS_HUB,
            &[
                "lobby",
                "bar",
                "restaurant",
                "roof-terrace",
                "bedroom",
                "hotel-entrance",
            ],
        ),
        // Outdoors locations are self-adjacent: each keys its own row.
        ("hotel-entrance", &["lobby", "promenade"]),
        ("promenade", &["hotel-entrance", "beach", "marina"]),
        ("beach", &["promenade", "open-water"]),
        ("marina", &["promenade", "open-water"]),
        // Mediterranean Sea, likewise self-adjacent.
        ("open-water", &["beach", "marina", "hidden-cove"]),
        ("hidden-cove", &["open-water"]),
    ];

    for (key, destinations) in rows {
        doc.available_destinations.insert(
            CategoryId::from(*key),
            destinations.iter().map(|d| LocationId::from(*d)).collect(),
        );
    }

    doc.bus_destinations = ["hotel-entrance", "promenade", "marina"]
        .iter()
        .map(|d| LocationId::from(*d))
        .collect();

    doc
}

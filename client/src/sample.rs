//! Starter records for a first run of the offline gallery, so the wall is
//! never blank before the first upload.

use chrono::{TimeZone, Utc};
use store::models::Memory;

fn sample(id: i32, title: &str, description: &str, image: &str, ymd: (i32, u32, u32)) -> Memory {
    let (y, m, d) = ymd;
    Memory {
        id,
        title: title.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        date: format!("{y:04}-{m:02}-{d:02}"),
        created_at: Utc
            .with_ymd_and_hms(y, m, d, 0, 0, 0)
            .single()
            .unwrap_or_default(),
    }
}

/// The fixed first-run gallery.
pub fn sample_memories() -> Vec<Memory> {
    vec![
        sample(
            1,
            "First Meeting",
            "The city park where we first met and talked for hours.",
            "https://images.unsplash.com/photo-1516589091380-5d8e87df8d7b?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            (2023, 5, 12),
        ),
        sample(
            2,
            "Beach Holiday",
            "Watching the sunset together in Bali. An unforgettable moment.",
            "https://images.unsplash.com/photo-1503516459261-40c66117780a?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            (2023, 7, 24),
        ),
        sample(
            3,
            "Your Birthday",
            "A little surprise party. The look on your face was priceless!",
            "https://images.unsplash.com/photo-1494774157365-9e04c6720e47?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            (2023, 9, 8),
        ),
        sample(
            4,
            "Romantic Dinner",
            "Candlelight dinner at our favorite restaurant. The food was good, your smile was sweeter.",
            "https://images.unsplash.com/photo-1518199266791-5375a83190b7?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            (2023, 11, 15),
        ),
        sample(
            5,
            "Walk in the Garden",
            "A beautiful afternoon among the flowers.",
            "https://images.unsplash.com/photo-1535615615570-3b839f4359be?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            (2024, 2, 22),
        ),
        sample(
            6,
            "Valentine's Day",
            "A small surprise on the day of love. Your face lit up at the flowers.",
            "https://images.unsplash.com/photo-1530122037265-a5f1f91d3b99?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            (2024, 2, 14),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_have_unique_ascending_ids() {
        let samples = sample_memories();
        assert_eq!(samples.len(), 6);
        for (i, memory) in samples.iter().enumerate() {
            assert_eq!(memory.id, i as i32 + 1);
            assert!(!memory.title.is_empty());
            assert!(memory.image.starts_with("https://"));
        }
    }
}

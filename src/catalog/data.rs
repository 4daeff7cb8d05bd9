//! Seeded property data

use super::{Property, Review};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The fixed property list the catalog is populated from at startup
pub(super) fn seed_properties() -> Vec<Property> {
    vec![
        Property {
            id: "wildhouse-farm".to_string(),
            name: "Wildhouse Farm".to_string(),
            location: "Milnrow, near Rochdale, Manchester".to_string(),
            image: "https://images.pexels.com/photos/1396122/pexels-photo-1396122.jpeg?auto=compress&cs=tinysrgb&w=800"
                .to_string(),
            price: "£778".to_string(),
            original_price: Some("£860".to_string()),
            sleeps: 6,
            bedrooms: 3,
            bathrooms: 2,
            dogs_allowed: 3,
            rating: 4.7,
            description: "This cosy yet spacious farmhouse provides the idyllic base for families, couples and \
                          their four-legged friends to relax in comfort and explore the local area. Situated next \
                          to the owners Italian Restaurant, nip next door for a delicious bite to eat and give the \
                          chefs of the group the evening off."
                .to_string(),
            features: strings(&[
                "Wood burner in lounge",
                "Fully equipped farmhouse kitchen",
                "Four-poster super-king bedroom",
                "Italian restaurant next door",
                "Vast garden with BBQ",
                "Boot room for cyclists",
            ]),
            nearby_attractions: strings(&[
                "Hollingworth Lake (2 miles)",
                "Piethorne Valley Country Park (3 miles)",
                "Peak District National Park (10 miles)",
                "Manchester City Centre (15 miles)",
            ]),
            reviews: vec![
                Review {
                    id: "1".to_string(),
                    author: "Nicola".to_string(),
                    rating: 4.8,
                    date: "15th January 2025".to_string(),
                    comment: "Lovely location with views across the valley. Very well equipped for a family stay. \
                              The restaurant next door was excellent."
                        .to_string(),
                },
                Review {
                    id: "2".to_string(),
                    author: "Sarah".to_string(),
                    rating: 4.4,
                    date: "8th November 2024".to_string(),
                    comment: "A lovely weekend away with the family. The house was always warm and clean \
                              throughout. Dog friendly made our weekend."
                        .to_string(),
                },
            ],
        },
        Property {
            id: "coastal-retreat".to_string(),
            name: "Coastal Retreat".to_string(),
            location: "St. Ives, Cornwall".to_string(),
            image: "https://images.pexels.com/photos/1029599/pexels-photo-1029599.jpeg?auto=compress&cs=tinysrgb&w=800"
                .to_string(),
            price: "£920".to_string(),
            original_price: None,
            sleeps: 4,
            bedrooms: 2,
            bathrooms: 1,
            dogs_allowed: 2,
            rating: 4.9,
            description: "A stunning coastal cottage with panoramic sea views, perfect for romantic getaways and \
                          small family holidays."
                .to_string(),
            features: strings(&[
                "Panoramic sea views",
                "Private garden",
                "Modern kitchen",
                "Cosy fireplace",
                "Walking distance to beach",
            ]),
            nearby_attractions: strings(&[
                "St. Ives Beach (0.2 miles)",
                "Tate St. Ives (0.5 miles)",
                "South West Coast Path",
                "Porthmeor Beach (0.3 miles)",
            ]),
            reviews: vec![Review {
                id: "3".to_string(),
                author: "Emma".to_string(),
                rating: 5.0,
                date: "20th March 2025".to_string(),
                comment: "Absolutely breathtaking views and perfect location. Could not have asked for more!"
                    .to_string(),
            }],
        },
        Property {
            id: "mountain-lodge".to_string(),
            name: "Mountain Lodge".to_string(),
            location: "Keswick, Lake District".to_string(),
            image: "https://images.pexels.com/photos/1029604/pexels-photo-1029604.jpeg?auto=compress&cs=tinysrgb&w=800"
                .to_string(),
            price: "£650".to_string(),
            original_price: None,
            sleeps: 8,
            bedrooms: 4,
            bathrooms: 3,
            dogs_allowed: 4,
            rating: 4.6,
            description: "A spacious mountain lodge surrounded by stunning fells, ideal for large groups and \
                          outdoor enthusiasts."
                .to_string(),
            features: strings(&[
                "Mountain views",
                "Large dining area",
                "Hot tub",
                "Drying room",
                "Secure bike storage",
                "Log fire",
            ]),
            nearby_attractions: strings(&[
                "Derwentwater (1 mile)",
                "Catbells Fell Walk (2 miles)",
                "Keswick Market (1.5 miles)",
                "Theatre by the Lake (1.5 miles)",
            ]),
            reviews: vec![Review {
                id: "4".to_string(),
                author: "David".to_string(),
                rating: 4.6,
                date: "10th February 2025".to_string(),
                comment: "Perfect base for hiking. The hot tub after a long day on the fells was amazing!"
                    .to_string(),
            }],
        },
    ]
}

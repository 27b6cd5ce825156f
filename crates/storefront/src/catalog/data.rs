//! Built-in demo catalog.

use sts_core::{Price, Product, ProductId};

struct Seed {
    id: &'static str,
    name: &'static str,
    price: u64,
    description: &'static str,
    category: &'static str,
    brand: &'static str,
    image: &'static str,
    colors: &'static [&'static str],
    featured: bool,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "1",
        name: "iPhone 15 Pro Max",
        price: 1299,
        description: "The most advanced iPhone with titanium design, A17 Pro chip, and revolutionary camera system.",
        category: "phones",
        brand: "apple",
        image: "https://images.pexels.com/photos/788946/pexels-photo-788946.jpeg",
        colors: &[
            "Natural Titanium",
            "Blue Titanium",
            "White Titanium",
            "Black Titanium",
        ],
        featured: true,
    },
    Seed {
        id: "2",
        name: "Samsung Galaxy S24 Ultra",
        price: 1199,
        description: "Premium Samsung flagship with S Pen, powerful cameras, and large display.",
        category: "phones",
        brand: "samsung",
        image: "https://images.pexels.com/photos/1440727/pexels-photo-1440727.jpeg",
        colors: &[
            "Titanium Gray",
            "Titanium Black",
            "Titanium Violet",
            "Titanium Yellow",
        ],
        featured: true,
    },
    Seed {
        id: "3",
        name: "Podoro Fast Wireless Charger",
        price: 45,
        description: "Fast wireless charging pad compatible with all Qi-enabled devices.",
        category: "chargers",
        brand: "podoro",
        image: "https://images.pexels.com/photos/4555484/pexels-photo-4555484.jpeg",
        colors: &["Black", "White"],
        featured: false,
    },
    Seed {
        id: "4",
        name: "AirPods Pro (2nd Generation)",
        price: 249,
        description: "Premium wireless earbuds with active noise cancellation and spatial audio.",
        category: "earphones",
        brand: "apple",
        image: "https://images.pexels.com/photos/8867434/pexels-photo-8867434.jpeg",
        colors: &["White"],
        featured: true,
    },
    Seed {
        id: "5",
        name: "Green Lion Leather Phone Case",
        price: 35,
        description: "Premium leather case with perfect fit and protection for your device.",
        category: "cases",
        brand: "greenLion",
        image: "https://images.pexels.com/photos/6039245/pexels-photo-6039245.jpeg",
        colors: &["Black", "Brown", "Blue", "Red"],
        featured: false,
    },
    Seed {
        id: "6",
        name: "Tempered Glass Screen Protector",
        price: 15,
        description: "Crystal clear tempered glass protection with 9H hardness rating.",
        category: "screenProtectors",
        brand: "greenLion",
        image: "https://images.pexels.com/photos/1440727/pexels-photo-1440727.jpeg",
        colors: &["Clear"],
        featured: false,
    },
    Seed {
        id: "7",
        name: "Xiaomi Redmi Note 13 Pro",
        price: 299,
        description: "Powerful mid-range smartphone with excellent camera and long battery life.",
        category: "phones",
        brand: "xiaomi",
        image: "https://images.pexels.com/photos/788946/pexels-photo-788946.jpeg",
        colors: &["Midnight Black", "Ocean Blue", "Sunset Orange"],
        featured: false,
    },
    Seed {
        id: "8",
        name: "Huawei P60 Pro",
        price: 899,
        description: "Professional photography smartphone with Leica camera system.",
        category: "phones",
        brand: "huawei",
        image: "https://images.pexels.com/photos/1440727/pexels-photo-1440727.jpeg",
        colors: &["Pearl White", "Emerald Green", "Rococo Pearl"],
        featured: false,
    },
    Seed {
        id: "9",
        name: "Samsung 25W Super Fast Charger",
        price: 29,
        description: "Official Samsung fast charger with USB-C cable included.",
        category: "chargers",
        brand: "samsung",
        image: "https://images.pexels.com/photos/4555484/pexels-photo-4555484.jpeg",
        colors: &["White", "Black"],
        featured: false,
    },
    Seed {
        id: "10",
        name: "Podoro Gaming Earbuds",
        price: 79,
        description: "Low-latency gaming earbuds with RGB lighting and superior sound quality.",
        category: "earphones",
        brand: "podoro",
        image: "https://images.pexels.com/photos/8867434/pexels-photo-8867434.jpeg",
        colors: &["Black", "White", "Red"],
        featured: false,
    },
];

/// The ten demo products the shop launches with.
#[must_use]
pub fn demo_products() -> Vec<Product> {
    SEEDS
        .iter()
        .map(|seed| Product {
            id: ProductId::new(seed.id),
            name: seed.name.to_string(),
            price: Price::from_units(seed.price),
            description: seed.description.to_string(),
            category: seed.category.to_string(),
            brand: seed.brand.to_string(),
            image: seed.image.to_string(),
            colors: seed.colors.iter().map(ToString::to_string).collect(),
            featured: seed.featured,
            in_stock: true,
            created_at: None,
        })
        .collect()
}

/// Category tags shown on the home page, in display order.
pub const CATEGORIES: &[&str] = &["phones", "chargers", "earphones", "cases", "screenProtectors"];

/// Brand tags shown on the home page, in display order.
pub const BRANDS: &[&str] = &["apple", "samsung", "podoro", "greenLion", "huawei", "xiaomi"];

//! Built-in seed catalogue.
//!
//! These records ship with the assistant and are what a fresh (or
//! unrecoverable) store starts from. All are attributed to `"system"` and
//! stamped with the catalogue revision date rather than load time, so two
//! fresh stores compare equal.

use super::{Category, StoredEntry};

/// Timestamp applied to every seed entry — the catalogue revision date.
const SEED_CREATED_AT: &str = "2025-11-01T08:00:00Z";

fn seed(topic: &str, content: &str, category: Category) -> StoredEntry {
    StoredEntry {
        topic: topic.to_string(),
        content: content.to_string(),
        category,
        created_by: "system".to_string(),
        created_at: SEED_CREATED_AT.to_string(),
    }
}

/// The full seed catalogue, in fixed order (products, support, policies,
/// warranty, installation).
pub fn seed_entries() -> Vec<StoredEntry> {
    vec![
        seed(
            "iPhone 15 Pro Max Details",
            "Features: A17 Pro chip, 6.7\" Super Retina XDR display, 48MP triple-camera system, titanium frame, USB-C port\n\
             Dimensions: 159.9 x 76.7 x 8.25 mm, 221g\n\
             Power: 4323mAh battery, 29W fast charging, MagSafe\n\
             Price: KSh 191,840\n\
             Setup: Insert SIM, power on, follow setup wizard, sign in with Apple ID\n\
             Accessories: AirPods Pro, MagSafe Charger, Apple Watch",
            Category::Products,
        ),
        seed(
            "Samsung Galaxy S24 Ultra Details",
            "Features: Snapdragon 8 Gen 3, 6.8\" Dynamic AMOLED 2X, 200MP camera, S Pen\n\
             Price: KSh 207,840\n\
             Accessories: Galaxy Buds Pro, Samsung Wireless Charger, SmartTag\n\
             Setup: Insert SIM, connect to WiFi, sign in to Google account",
            Category::Products,
        ),
        seed(
            "MacBook Pro 16 M3 Max Details",
            "Features: M3 Max chip, 16.2\" Liquid Retina XDR display, 32GB RAM\n\
             Price: KSh 559,840\n\
             Accessories: Magic Mouse, USB-C hub, AirPods Max\n\
             Setup: Power on and follow macOS setup wizard",
            Category::Products,
        ),
        seed(
            "LG OLED C3 55 TV Details",
            "Features: 4K OLED panel, Dolby Vision, 120Hz refresh rate\n\
             Price: KSh 239,840\n\
             Accessories: LG Soundbar, HDMI 2.1 Cable, Smart Remote\n\
             Setup: Mount on wall/stand, connect power and WiFi, adjust display settings",
            Category::Products,
        ),
        seed(
            "Common Smartphone Issues",
            "Battery Drains Fast:\n\
             - Disable background apps\n\
             - Lower screen brightness\n\
             - Update to latest OS\n\
             \n\
             Bluetooth Issues:\n\
             - Restart device\n\
             - Unpair and re-pair device",
            Category::Support,
        ),
        seed(
            "Laptop Troubleshooting",
            "Overheating:\n\
             - Use cooling pad\n\
             - Clean vents and update drivers\n\
             \n\
             WiFi Issues:\n\
             - Restart router\n\
             - Update network drivers",
            Category::Support,
        ),
        seed(
            "Store Policies and Delivery",
            "Order Tracking: Use order number on website/app\n\
             Shipping: Free delivery for orders above KSh 10,000\n\
             Returns: 7-day return window for unused products\n\
             Warranty: 1-2 years depending on product\n\
             Payment: M-Pesa, Credit/Debit Cards, Financing options\n\
             Store Hours: 8 AM - 8 PM (Mon-Sat)\n\
             Contact: 0700 123 456 or support@electronics.co.ke",
            Category::General,
        ),
        seed(
            "Product Recommendations",
            "Budget Recommendations:\n\
             - Best smartphones under KSh 80,000: Google Pixel 7a\n\
             - Best laptops under KSh 160,000: Lenovo ThinkPad X1\n\
             \n\
             Feature-Based Selection:\n\
             - Best TV for gaming: LG OLED C3\n\
             - Best laptop for designers: MacBook Pro M3\n\
             \n\
             Upgrade Paths:\n\
             - iPhone 14 \u{2192} iPhone 15 Pro Max\n\
             - MacBook Air M2 \u{2192} MacBook Pro M3",
            Category::General,
        ),
        seed(
            "Warranty Information",
            "Standard Warranty Coverage:\n\
             - Smartphones: 1 year manufacturer warranty\n\
             - Laptops: 2 years international warranty\n\
             - TVs: 2 years local warranty\n\
             - Home Appliances: 1 year parts and labor\n\
             \n\
             Extended Warranty Options:\n\
             - AppleCare+ (iPhones, MacBooks): 2-3 years\n\
             - Samsung Care+ (Galaxy devices): 2 years\n\
             - LG Extended Care: Up to 3 years\n\
             \n\
             What's Covered:\n\
             - Manufacturing defects\n\
             - Hardware malfunctions\n\
             - Display issues\n\
             - Battery defects (for mobile devices)\n\
             \n\
             What's Not Covered:\n\
             - Physical damage\n\
             - Water damage\n\
             - Unauthorized repairs\n\
             - Normal wear and tear",
            Category::Warranty,
        ),
        seed(
            "Device Setup and Installation",
            "TV Installation:\n\
             1. Wall mounting service available\n\
             2. Smart TV setup and WiFi connection\n\
             3. Channel tuning and app installation\n\
             4. Sound system integration\n\
             \n\
             Home Appliance Installation:\n\
             1. Professional installation service\n\
             2. Electrical safety checks\n\
             3. Performance testing\n\
             4. User training session\n\
             \n\
             Smart Home Setup:\n\
             1. Device integration\n\
             2. App configuration\n\
             3. Voice assistant setup\n\
             4. Automation rules setup",
            Category::Installation,
        ),
        seed(
            "Smart Home Devices",
            "Smart Speakers:\n\
             - Amazon Echo (4th Gen): KSh 15,999\n\
             - Google Nest Audio: KSh 14,999\n\
             - Apple HomePod Mini: KSh 19,999\n\
             \n\
             Security Cameras:\n\
             - Ring Doorbell Pro: KSh 29,999\n\
             - Arlo Pro 4: KSh 39,999\n\
             - Nest Cam (Battery): KSh 34,999\n\
             \n\
             Smart Lighting:\n\
             - Philips Hue Starter Kit: KSh 24,999\n\
             - LIFX Color: KSh 7,999\n\
             - Nanoleaf Shapes: KSh 29,999",
            Category::Products,
        ),
        seed(
            "Gaming Consoles",
            "PlayStation 5:\n\
             - Digital Edition: KSh 69,999\n\
             - Disc Edition: KSh 79,999\n\
             - Extra Controller: KSh 9,999\n\
             - PS Plus subscription available\n\
             \n\
             Xbox Series X/S:\n\
             - Series X: KSh 79,999\n\
             - Series S: KSh 44,999\n\
             - Game Pass subscription available\n\
             \n\
             Gaming Accessories:\n\
             - Gaming Headsets: KSh 8,999 - 29,999\n\
             - Gaming Chairs: KSh 24,999 - 49,999\n\
             - Gaming Monitors: KSh 39,999 - 89,999",
            Category::Products,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_twelve_entries() {
        assert_eq!(seed_entries().len(), 12);
    }

    #[test]
    fn seed_entries_are_system_authored() {
        for e in seed_entries() {
            assert_eq!(e.created_by, "system");
            assert_eq!(e.created_at, SEED_CREATED_AT);
            assert!(!e.topic.is_empty());
            assert!(!e.content.is_empty());
        }
    }

    #[test]
    fn seed_covers_every_category() {
        let entries = seed_entries();
        for c in Category::ALL {
            assert!(
                entries.iter().any(|e| e.category == c),
                "no seed entry for category {c}"
            );
        }
    }
}

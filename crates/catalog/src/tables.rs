//! Built-in brand catalogs.
//!
//! Static stand-ins for live brand collectors: four shoes per brand,
//! covering every demographic group. The cheapest entry is $50.

use crate::types::{Brand, Demographic, Product};

const NIKE_IMAGES: &str = "https://static.nike.com/a/images/t_PDP_864_v1/f_auto,b_rgb:f5f5f5";
const ADIDAS_IMAGES: &str = "https://assets.adidas.com/images/h_840,f_auto,q_auto,fl_lossy,c_fill,g_auto";
const PUMA_IMAGES: &str = "https://images.puma.com/image/upload/f_auto,q_auto,b_rgb:fafafa,w_1200,h_1200/global";

/// The built-in table for one brand.
pub fn builtin_products(brand: Brand) -> Vec<Product> {
    match brand {
        Brand::Nike => nike(),
        Brand::Adidas => adidas(),
        Brand::Puma => puma(),
    }
}

fn nike() -> Vec<Product> {
    vec![
        Product::new(
            Brand::Nike,
            "Nike Air Max 270",
            150.00,
            "https://nike.com/airmax270",
            Demographic::Male,
            "The Nike Air Max 270 features Nike's biggest and boldest Max Air unit yet.",
        )
        .with_image_url(format!("{NIKE_IMAGES}/abc/nike-air-max-270.png")),
        Product::new(
            Brand::Nike,
            "Nike Revolution 6",
            65.00,
            "https://nike.com/revolution6",
            Demographic::Female,
            "Lightweight comfort for your run.",
        )
        .with_image_url(format!("{NIKE_IMAGES}/def/nike-revolution-6.png")),
        Product::new(
            Brand::Nike,
            "Nike Flex Runner 2",
            50.00,
            "https://nike.com/flexrunner2",
            Demographic::Kid,
            "Easy to slip on, super flexible for kids.",
        )
        .with_image_url(format!("{NIKE_IMAGES}/ghi/nike-flex-runner-2.png")),
        Product::new(
            Brand::Nike,
            "Nike Air Force 1",
            110.00,
            "https://nike.com/airforce1",
            Demographic::Male,
            "Iconic style that transcends generations.",
        )
        .with_image_url(format!("{NIKE_IMAGES}/jkl/nike-air-force-1.png")),
    ]
}

fn adidas() -> Vec<Product> {
    vec![
        Product::new(
            Brand::Adidas,
            "Adidas Ultraboost Light",
            180.00,
            "https://adidas.com/ultraboostlight",
            Demographic::Male,
            "Experience epic energy with the new Ultraboost Light, our lightest Ultraboost ever.",
        )
        .with_image_url(format!("{ADIDAS_IMAGES}/123/Ultraboost_Light.jpg")),
        Product::new(
            Brand::Adidas,
            "Adidas Stan Smith",
            100.00,
            "https://adidas.com/stansmith",
            Demographic::Female,
            "Timeless style for every day.",
        )
        .with_image_url(format!("{ADIDAS_IMAGES}/456/Stan_Smith.jpg")),
        Product::new(
            Brand::Adidas,
            "Adidas Grand Court",
            60.00,
            "https://adidas.com/grandcourt",
            Demographic::Kid,
            "Comfortable shoes for little feet.",
        )
        .with_image_url(format!("{ADIDAS_IMAGES}/789/Grand_Court.jpg")),
        Product::new(
            Brand::Adidas,
            "Adidas NMD_R1",
            140.00,
            "https://adidas.com/nmd_r1",
            Demographic::Male,
            "Progressive style with a comfortable feel.",
        )
        .with_image_url(format!("{ADIDAS_IMAGES}/abc/NMD_R1.jpg")),
    ]
}

fn puma() -> Vec<Product> {
    vec![
        Product::new(
            Brand::Puma,
            "Puma Suede Classic XXI",
            75.00,
            "https://puma.com/suedeclassic",
            Demographic::Male,
            "The iconic PUMA Suede, a footwear legend.",
        )
        .with_image_url(format!(
            "{PUMA_IMAGES}/374915/01/sv01/fnd/PNA/fmt/png/PUMA-Suede-Classic-XXI-Men's-Sneakers"
        )),
        Product::new(
            Brand::Puma,
            "Puma Carina Street",
            65.00,
            "https://puma.com/carinastreet",
            Demographic::Female,
            "Retro sport-inspired, platform style.",
        )
        .with_image_url(format!(
            "{PUMA_IMAGES}/389390/01/sv01/fnd/PNA/fmt/png/Carina-Street-Women's-Sneakers"
        )),
        Product::new(
            Brand::Puma,
            "Puma Anzarun Lite SlipOn",
            50.00,
            "https://puma.com/anzarunliteslipon",
            Demographic::Kid,
            "Lightweight and easy for kids on the go.",
        )
        .with_image_url(format!(
            "{PUMA_IMAGES}/377493/02/sv01/fnd/PNA/fmt/png/Anzarun-Lite-Slip-On-Kids'-Shoes"
        )),
        Product::new(
            Brand::Puma,
            "Puma RS-X Efekt",
            110.00,
            "https://puma.com/rsxefekt",
            Demographic::Male,
            "Futuristic design with bold detailing.",
        )
        .with_image_url(format!(
            "{PUMA_IMAGES}/390776/01/sv01/fnd/PNA/fmt/png/RS-X-Efekt-Gradient-Men's-Sneakers"
        )),
    ]
}

//! Visitor exercise
//!
//! A village of shops accepts an order visitor that walks every shop. A
//! shop that is out of an item it sells orders the ingredients by sending a
//! visitor of its own through the village before handing the item over.

use std::collections::HashMap;

use crate::core::config::ExerciseConfig;
use crate::core::error::ExerciseError;
use crate::core::transcript::Transcript;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopKind {
    Restaurant,
    Butcher,
    Baker,
    CondimentGrocer,
    VegetableGrocer,
    PickleGrocer,
    Maker,
}

#[derive(Debug)]
pub struct Shop {
    pub name: String,
    pub address: String,
    pub kind: ShopKind,
    /// Item sold, in listing order, with the ingredients needed to make it
    items: Vec<(String, Vec<String>)>,
    inventory: HashMap<String, u32>,
}

impl Shop {
    pub fn new(name: &str, address: &str, kind: ShopKind, items: &[(&str, &[&str])]) -> Self {
        Self {
            name: name.to_string(),
            address: address.to_string(),
            kind,
            items: items
                .iter()
                .map(|(item, ingredients)| {
                    let ingredients = ingredients.iter().map(|s| s.to_string()).collect();
                    (item.to_string(), ingredients)
                })
                .collect(),
            inventory: HashMap::new(),
        }
    }

    pub fn sells(&self, item: &str) -> bool {
        self.items.iter().any(|(name, _)| name == item)
    }

    pub fn in_stock(&self, item: &str) -> bool {
        self.inventory.get(item).is_some_and(|count| *count > 0)
    }

    pub fn ingredients(&self, item: &str) -> &[String] {
        self.items
            .iter()
            .find(|(name, _)| name == item)
            .map(|(_, ingredients)| ingredients.as_slice())
            .unwrap_or(&[])
    }

    pub fn add_to_inventory(&mut self, item: &str) {
        *self.inventory.entry(item.to_string()).or_insert(0) += 1;
    }

    /// Take whatever of `items` this shop has in stock out of its inventory
    pub fn pickup_order(&mut self, items: &[String], out: &mut Transcript) -> Vec<String> {
        let mut picked_up = Vec::new();
        for item in items.iter().filter(|item| self.sells(item)) {
            if self.in_stock(item) {
                picked_up.push(item.clone());
            } else {
                out.line(format!(
                    "  Error!  {}: Item {} is not in the inventory when it should be.",
                    self.name, item
                ));
            }
        }
        for item in &picked_up {
            if let Some(count) = self.inventory.get_mut(item) {
                *count -= 1;
            }
        }
        if !picked_up.is_empty() {
            out.line(format!(
                "  {}: Order picked up for {}.",
                self.name,
                picked_up.join(", ")
            ));
        }
        picked_up
    }
}

/// Operation carried from shop to shop
pub trait ShopVisitor {
    fn visit_shop(&mut self, village: &mut Village, shop: usize, out: &mut Transcript);
}

/// Orders a list of items from whichever shops sell them
#[derive(Debug, Default)]
pub struct OrderVisitor {
    pub items_to_order: Vec<String>,
    pub items_received: Vec<String>,
    pub shop_name_received_from: String,
}

impl OrderVisitor {
    pub fn new(items: &[String]) -> Self {
        Self {
            items_to_order: items.to_vec(),
            ..Self::default()
        }
    }
}

impl ShopVisitor for OrderVisitor {
    fn visit_shop(&mut self, village: &mut Village, shop: usize, out: &mut Transcript) {
        if village.place_order(shop, &self.items_to_order, out) {
            let shop = &mut village.shops[shop];
            self.items_received = shop.pickup_order(&self.items_to_order, out);
            self.shop_name_received_from = shop.name.clone();
        }
    }
}

#[derive(Debug, Default)]
pub struct Village {
    pub name: String,
    shops: Vec<Shop>,
}

impl Village {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self) {
        use ShopKind::*;

        self.name = "Village of Self-Sufficiency".to_string();
        self.shops = vec![
            Shop::new(
                "Joe's Burger Joint",
                "47 Millings Rd.",
                Restaurant,
                &[(
                    "hamburger",
                    &[
                        "ground beef",
                        "hamburger buns",
                        "ketchup",
                        "mustard",
                        "mayonnaise",
                        "lettuce",
                        "tomato",
                        "onion",
                        "pickles",
                    ],
                )],
            ),
            Shop::new("Amelia's Butcher Shop", "12 Klaxon Ave.", Butcher, &[("ground beef", &[])]),
            Shop::new(
                "Oxel's Breads and Buns Bakery",
                "131 Worthington Dr.",
                Baker,
                &[("hamburger buns", &[])],
            ),
            Shop::new(
                "Connie's Condiments",
                "83 Millings Rd.",
                CondimentGrocer,
                &[
                    ("ketchup", &["fresh ketchup"]),
                    ("mustard", &["fresh mustard"]),
                    ("mayonnaise", &["fresh mayonnaise"]),
                ],
            ),
            Shop::new(
                "Florence's Vegetables",
                "32 Main St.",
                VegetableGrocer,
                &[
                    ("lettuce", &[]),
                    ("tomato", &[]),
                    ("onion", &[]),
                    ("cucumber", &[]),
                    ("mustard seed", &[]),
                ],
            ),
            Shop::new(
                "Larry's Pickle Emporium",
                "34 Main St.",
                PickleGrocer,
                &[("pickles", &["vinegar", "cucumber", "salt"])],
            ),
            Shop::new(
                "Klyde and Sons Ketchup Makers",
                "800 Overtown Rd.",
                Maker,
                &[("fresh ketchup", &[])],
            ),
            Shop::new(
                "Molly's Mustard Mart",
                "810 Overtown Rd.",
                Maker,
                &[("fresh mustard", &["vinegar", "mustard seed"])],
            ),
            Shop::new("Turk's Mayo Supply", "820 Overtown Rd.", Maker, &[("fresh mayonnaise", &[])]),
            Shop::new("Vinnies' Sour Flavors", "830 Overtown Rd.", Maker, &[("vinegar", &[])]),
            Shop::new("Jessie's Salt Works", "920 Overtown Rd.", Maker, &[("salt", &[])]),
        ];
        log::debug!("loaded {} shops into {}", self.shops.len(), self.name);
    }

    /// Send `visitor` to every shop
    pub fn accept(&mut self, visitor: &mut dyn ShopVisitor, out: &mut Transcript) {
        self.accept_except(visitor, None, out);
    }

    fn accept_except(
        &mut self,
        visitor: &mut dyn ShopVisitor,
        skip: Option<usize>,
        out: &mut Transcript,
    ) {
        for index in 0..self.shops.len() {
            if Some(index) != skip {
                let shop = &self.shops[index];
                log::trace!("visiting {:?} {} at {}", shop.kind, shop.name, shop.address);
                visitor.visit_shop(self, index, out);
            }
        }
    }

    /// Place an order with one shop, restocking whatever it is out of.
    ///
    /// Returns false when the shop sells none of the items.
    pub fn place_order(&mut self, shop: usize, items: &[String], out: &mut Transcript) -> bool {
        let (in_this_shop, out_of_stock): (Vec<String>, Vec<String>) = {
            let shop = &self.shops[shop];
            let in_this_shop: Vec<String> =
                items.iter().filter(|item| shop.sells(item)).cloned().collect();
            let out_of_stock = in_this_shop
                .iter()
                .filter(|item| !shop.in_stock(item))
                .cloned()
                .collect();
            (in_this_shop, out_of_stock)
        };
        if in_this_shop.is_empty() {
            return false;
        }

        let name = self.shops[shop].name.clone();
        out.line(format!(
            "  {}: Received an order for {}.",
            name,
            in_this_shop.join(", ")
        ));

        for item in &out_of_stock {
            let ingredients = self.shops[shop].ingredients(item).to_vec();
            if ingredients.is_empty() {
                out.line(format!("  {}:   {} out of stock, making...", name, item));
            } else {
                out.line(format!(
                    "  {}:   {} out of stock, ordering ingredients to make more...",
                    name, item
                ));
                let mut reorder = OrderVisitor::new(&ingredients);
                self.accept_except(&mut reorder, Some(shop), out);
            }
            self.shops[shop].add_to_inventory(item);
        }
        true
    }
}

pub fn run(_config: &ExerciseConfig, out: &mut Transcript) -> Result<(), ExerciseError> {
    out.line("  Creating Village");
    let mut village = Village::new();
    village.load();

    let mut visitor = OrderVisitor::new(&["hamburger".to_string()]);
    out.line(format!(
        "  Ordering a hamburger from a shop in the {}",
        village.name
    ));
    village.accept(&mut visitor, out);

    match visitor.items_received.first() {
        Some(item) => out.line(format!(
            "  We received a {} from {}.",
            item, visitor.shop_name_received_from
        )),
        None => {
            return Err(ExerciseError::Failed(
                "Failed to receive a hamburger".to_string(),
            ))
        }
    }
    Ok(())
}

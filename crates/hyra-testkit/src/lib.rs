// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use hyra_app::{
    Apartment, ApartmentFormInput, AppState, IdGenerator, IdStrategy, Key, KeyFormInput, Record,
    RecordId, Tenant, TenantFormInput,
};

const FIRST_NAMES: [&str; 16] = [
    "Astrid", "Johan", "Elin", "Oskar", "Maja", "Erik", "Saga", "Nils", "Ebba", "Lars", "Alva",
    "Henrik", "Tove", "Viktor", "Ingrid", "Anton",
];
const LAST_NAMES: [&str; 14] = [
    "Andersson",
    "Johansson",
    "Karlsson",
    "Nilsson",
    "Eriksson",
    "Larsson",
    "Olsson",
    "Persson",
    "Svensson",
    "Gustafsson",
    "Lindberg",
    "Berg",
    "Holm",
    "Ek",
];
const EMAIL_DOMAINS: [&str; 4] = ["example.se", "post.example", "mail.test", "hyra.local"];

const STREET_NAMES: [&str; 12] = [
    "Hornsgatan",
    "Götgatan",
    "Ringvägen",
    "Folkungagatan",
    "Sveavägen",
    "Odengatan",
    "Linnégatan",
    "Storgatan",
    "Kungsgatan",
    "Drottninggatan",
    "Skolgatan",
    "Kyrkogatan",
];
const CITIES: [&str; 8] = [
    "Stockholm",
    "Göteborg",
    "Malmö",
    "Uppsala",
    "Västerås",
    "Örebro",
    "Linköping",
    "Umeå",
];

const KEY_TYPES: [&str; 8] = [
    "Main door",
    "Apartment door",
    "Mailbox",
    "Storage room",
    "Laundry room",
    "Bike room",
    "Garage",
    "Tag",
];

const DEMO_SEED: u64 = 7;
const DEMO_APARTMENTS: usize = 5;
const DEMO_TENANTS: usize = 8;
const DEMO_KEYS_PER_APARTMENT: usize = 2;

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator for plausible tenant, apartment and key form input.
#[derive(Debug, Clone)]
pub struct RentalFaker {
    rng: DeterministicRng,
}

impl RentalFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn tenant(&mut self) -> TenantFormInput {
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let domain = self.pick(&EMAIL_DOMAINS);
        TenantFormInput {
            first_name: first.to_owned(),
            last_name: last.to_owned(),
            email: format!(
                "{}.{}@{domain}",
                ascii_slug(first),
                ascii_slug(last)
            ),
            phone_number: format!(
                "07{}-{:03} {:02} {:02}",
                self.int_range(0, 9),
                self.int_range(100, 999),
                self.int_range(0, 99),
                self.int_range(0, 99),
            ),
            personal_number: format!(
                "{}{:02}{:02}-{:04}",
                self.int_range(1940, 2005),
                self.int_range(1, 12),
                self.int_range(1, 28),
                self.int_range(0, 9999),
            ),
        }
    }

    pub fn apartment(&mut self) -> ApartmentFormInput {
        let floor = self.int_range(0, 6);
        ApartmentFormInput {
            street: self.pick(&STREET_NAMES).to_owned(),
            number: self.int_range(1, 120).to_string(),
            apartment_number: (1000 + floor * 100 + self.int_range(1, 4)).to_string(),
            floor: floor.to_string(),
            postal_code: format!(
                "{:03} {:02}",
                self.int_range(100, 989),
                self.int_range(10, 99)
            ),
            city: self.pick(&CITIES).to_owned(),
        }
    }

    pub fn key(&mut self) -> KeyFormInput {
        let key_type = self.pick(&KEY_TYPES);
        KeyFormInput {
            key_type: key_type.to_owned(),
            number: format!(
                "{}-{:03}",
                key_type.chars().next().unwrap_or('K').to_ascii_uppercase(),
                self.int_range(1, 999)
            ),
            amount: self.int_range(1, 4) as f64,
        }
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }
}

fn ascii_slug(value: &str) -> String {
    value
        .chars()
        .map(|ch| match ch {
            'å' | 'ä' | 'Å' | 'Ä' => 'a',
            'ö' | 'Ö' => 'o',
            'é' | 'É' => 'e',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

fn tenant_from_input(id: RecordId, input: TenantFormInput) -> Tenant {
    Tenant {
        id,
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        phone_number: input.phone_number,
        personal_number: input.personal_number,
        apartment_ids: Vec::new(),
        key_ids: Vec::new(),
    }
}

fn apartment_from_input(id: RecordId, input: ApartmentFormInput) -> Apartment {
    Apartment {
        id,
        street: input.street,
        number: input.number,
        apartment_number: input.apartment_number,
        floor: input.floor,
        postal_code: input.postal_code,
        city: input.city,
        tenant_ids: Vec::new(),
        key_ids: Vec::new(),
    }
}

fn key_from_input(id: RecordId, input: KeyFormInput) -> Key {
    Key {
        id,
        key_type: input.key_type,
        number: input.number,
        amount: input.amount,
        tenant_ids: Vec::new(),
        apartment_ids: Vec::new(),
    }
}

/// State with a sequential id generator, so ids are "1", "2", ... in tests.
pub fn sequential_state() -> AppState {
    AppState::with_id_generator(IdGenerator::for_strategy(IdStrategy::Sequential))
}

/// Fills `state` with a small, linked data set for demos.
///
/// Unlike records created through the form, demo records carry relation ids on
/// both sides: each tenant lives in one apartment and holds that apartment's
/// keys.
pub fn seed_demo_data(state: &mut AppState) {
    let mut faker = RentalFaker::new(DEMO_SEED);

    let mut apartments = (0..DEMO_APARTMENTS)
        .map(|_| {
            let id = state.allocate_id();
            apartment_from_input(id, faker.apartment())
        })
        .collect::<Vec<_>>();

    let mut keys = Vec::new();
    for apartment in &mut apartments {
        for _ in 0..DEMO_KEYS_PER_APARTMENT {
            let mut key = key_from_input(state.allocate_id(), faker.key());
            key.apartment_ids.push(apartment.id.clone());
            apartment.key_ids.push(key.id.clone());
            keys.push(key);
        }
    }

    let mut tenants = Vec::new();
    for index in 0..DEMO_TENANTS {
        let mut tenant = tenant_from_input(state.allocate_id(), faker.tenant());
        let apartment = &mut apartments[index % DEMO_APARTMENTS];
        tenant.apartment_ids.push(apartment.id.clone());
        apartment.tenant_ids.push(tenant.id.clone());
        for key in keys
            .iter_mut()
            .filter(|key| key.apartment_ids.contains(&apartment.id))
        {
            key.tenant_ids.push(tenant.id.clone());
            tenant.key_ids.push(key.id.clone());
        }
        tenants.push(tenant);
    }

    tenants
        .into_iter()
        .map(Record::Tenant)
        .chain(apartments.into_iter().map(Record::Apartment))
        .chain(keys.into_iter().map(Record::Key))
        .for_each(|record| state.seed_record(record));
}

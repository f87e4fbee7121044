//! Element types shared by the unit tests

use crate::InvokeError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    pub street: String,
    pub town: String,
    pub postcode: String,
}

impl Address {
    pub fn new(street: &str, town: &str, postcode: &str) -> Self {
        Self {
            street: street.to_string(),
            town: town.to_string(),
            postcode: postcode.to_string(),
        }
    }

    pub fn street(&self) -> String {
        self.street.clone()
    }

    pub fn town(&self) -> String {
        self.town.clone()
    }

    pub fn postcode(&self) -> String {
        self.postcode.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub address: Option<Address>,
}

impl Person {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            address: None,
        }
    }

    pub fn living_at(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn first_name(&self) -> String {
        self.first_name.clone()
    }

    pub fn last_name(&self) -> String {
        self.last_name.clone()
    }

    pub fn address(&self) -> Option<Address> {
        self.address.clone()
    }

    pub fn initials(&self, separator: String) -> String {
        let first = self.first_name.chars().next().unwrap_or('?');
        let last = self.last_name.chars().next().unwrap_or('?');
        format!("{first}{separator}{last}")
    }

    pub fn badge(&self) -> Badge {
        Badge {
            number: self.first_name.len() as i64,
        }
    }

    pub fn age_check(&self) -> Result<i64, InvokeError> {
        Err(InvokeError::failed(
            "age_check",
            format!("no age recorded for {}", self.first_name),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Badge {
    pub number: i64,
}

impl Badge {
    pub fn number(&self) -> i64 {
        self.number
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Employee {
    pub person: Person,
    pub employee_id: i64,
}

impl Employee {
    pub fn employee_id(&self) -> i64 {
        self.employee_id
    }

    pub fn badge(&self) -> Badge {
        Badge {
            number: self.employee_id,
        }
    }
}

crate::recordable! {
    impl Address {
        street() -> String;
        town() -> String;
        postcode() -> String;
    }
}

crate::recordable! {
    impl Person {
        first_name() -> String;
        last_name() -> String;
        address() => Address;
        initials(separator: String) -> String;
        badge() => Badge;
        age_check() -> i64;
    }
}

crate::recordable! {
    sealed impl Badge {
        number() -> i64;
    }
}

crate::recordable! {
    impl Employee: Person via person {
        employee_id() -> i64;
        badge() => Badge;
    }
}

pub fn people() -> Vec<Person> {
    vec![
        Person::new("Billy", "Smith").living_at(Address::new("1 High St", "Leeds", "LS1")),
        Person::new("Billy", "Jones").living_at(Address::new("2 Low Rd", "York", "YO1")),
        Person::new("James", "Smith"),
    ]
}

//! Element types for integration tests

use chainquery::{recordable, InvokeError};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Town {
    pub name: String,
    pub county: String,
}

impl Town {
    pub fn name(&self) -> String {
        self.name.clone()
    }

    pub fn county(&self) -> String {
        self.county.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    pub street: String,
    pub town: Town,
}

impl Address {
    pub fn new(street: &str, town: &str, county: &str) -> Self {
        Self {
            street: street.to_string(),
            town: Town {
                name: town.to_string(),
                county: county.to_string(),
            },
        }
    }

    pub fn street(&self) -> String {
        self.street.clone()
    }

    pub fn town(&self) -> Town {
        self.town.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub address: Option<Address>,
}

impl Person {
    pub fn new(first_name: &str, last_name: &str, age: i64) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            age,
            address: None,
        }
    }

    pub fn at(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn first_name(&self) -> String {
        self.first_name.clone()
    }

    pub fn last_name(&self) -> String {
        self.last_name.clone()
    }

    pub fn age(&self) -> i64 {
        self.age
    }

    pub fn address(&self) -> Option<Address> {
        self.address.clone()
    }

    pub fn full_name(&self, separator: String) -> String {
        format!("{}{}{}", self.first_name, separator, self.last_name)
    }

    pub fn older_than(&self, years: i64) -> bool {
        self.age > years
    }

    pub fn retirement_age(&self) -> Result<i64, InvokeError> {
        if self.age < 0 {
            return Err(InvokeError::failed("retirement_age", "negative age"));
        }
        Ok(67)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub code: String,
}

impl Ticket {
    pub fn code(&self) -> String {
        self.code.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Employee {
    pub person: Person,
    pub payroll: i64,
}

impl Employee {
    pub fn payroll(&self) -> i64 {
        self.payroll
    }

    pub fn ticket(&self) -> Ticket {
        Ticket {
            code: format!("E{}", self.payroll),
        }
    }
}

recordable! {
    impl Town {
        name() -> String;
        county() -> String;
    }
}

recordable! {
    impl Address {
        street() -> String;
        town() => Town;
    }
}

recordable! {
    impl Person {
        first_name() -> String;
        last_name() -> String;
        age() -> i64;
        address() => Address;
        full_name(separator: String) -> String;
        older_than(years: i64) -> bool;
        retirement_age() -> i64;
    }
}

recordable! {
    sealed impl Ticket {
        code() -> String;
    }
}

recordable! {
    impl Employee: Person via person {
        payroll() -> i64;
        ticket() => Ticket;
    }
}

/// Billy Smith (Leeds), Billy Jones (York), James Smith (no address)
pub fn people() -> Vec<Person> {
    vec![
        Person::new("Billy", "Smith", 34).at(Address::new("1 High St", "Leeds", "West Yorkshire")),
        Person::new("Billy", "Jones", 51).at(Address::new("2 Low Rd", "York", "North Yorkshire")),
        Person::new("James", "Smith", 19),
    ]
}

pub fn employee(first: &str, last: &str, payroll: i64) -> Employee {
    Employee {
        person: Person::new(first, last, 40).at(Address::new("9 Mill Ln", "Hull", "East Riding")),
        payroll,
    }
}

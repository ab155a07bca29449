//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod account;
pub mod fee;
pub mod fee_collection;
pub mod household;
pub mod household_member;
pub mod payment;
pub mod resident;
pub mod vehicle;

// Re-export specific types to avoid conflicts
pub use account::{Column as AccountColumn, Entity as Account, Model as AccountModel, Role};
pub use fee::{Column as FeeColumn, Entity as Fee, FeeCategory, Model as FeeModel};
pub use fee_collection::{
    Column as FeeCollectionColumn, Entity as FeeCollection, Model as FeeCollectionModel,
};
pub use household::{Column as HouseholdColumn, Entity as Household, Model as HouseholdModel};
pub use household_member::{
    Column as HouseholdMemberColumn, Entity as HouseholdMember, Model as HouseholdMemberModel,
};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel, PaymentStatus};
pub use resident::{Column as ResidentColumn, Entity as Resident, Model as ResidentModel};
pub use vehicle::{Column as VehicleColumn, Entity as Vehicle, Model as VehicleModel, VehicleKind};

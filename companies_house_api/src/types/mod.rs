mod meta;
pub use self::meta::ItemList;

mod address;
pub use self::address::Address;

mod date;
pub use self::date::{ApiDate, DatePart, DateParts};

mod search;
pub use self::search::{SearchHit, SearchPage};

mod company;
pub use self::company::{Accounts, CompanyProfile, ConfirmationStatement, LastAccounts, NextAccounts};

mod officer;
pub use self::officer::Officer;

mod filing;
pub use self::filing::Filing;

mod charge;
pub use self::charge::Charge;

mod psc;
pub use self::psc::{NameElements, PersonWithSignificantControl};

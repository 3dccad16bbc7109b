pub mod economy;
pub mod loan;
pub mod region;
pub mod system;
pub mod transaction;

use crate::cli::registry::CommandRegistry;

pub fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions()
        .into_iter()
        .chain(region::definitions())
        .chain(transaction::definitions())
        .chain(loan::definitions())
        .chain(economy::definitions())
    {
        registry.register(entry);
    }
}

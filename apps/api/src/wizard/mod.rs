// Wizard Controller: five-step state machine, session store and the screen handlers.

pub mod controller;
pub mod handlers;
pub mod store;

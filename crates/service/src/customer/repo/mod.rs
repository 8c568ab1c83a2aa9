pub mod seaorm;
pub mod map;

pub use map::MapCustomerRepository;
pub use seaorm::SeaOrmCustomerRepository;

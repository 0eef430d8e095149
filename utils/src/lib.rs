mod block;
pub use block::Block;

mod hex;
pub use self::hex::hexstr;

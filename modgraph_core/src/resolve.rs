pub mod alias;
pub mod path_resolver;
pub mod paths;
pub mod read;


pub use alias::AliasMap;
pub use path_resolver::{PathResolver, ResolverOptions};

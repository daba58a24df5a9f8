pub mod alias;
pub mod assembler;
pub mod compiler;
pub mod fs_ops;
pub mod packager;
pub mod scan;
pub mod symlinks;

mod block;
mod compatibility;
mod dimensions;
mod edges;
mod traversal;

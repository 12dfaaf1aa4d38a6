mod test_triangulation_basic;

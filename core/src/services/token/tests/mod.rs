mod extract_tests;
